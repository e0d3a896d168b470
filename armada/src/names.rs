// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lookup of the names players are shown under.
use std::collections::HashMap;

use crate::session::PlayerId;

/// Name shown for a player whose display name cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Resolves a player id to a human readable name.
pub trait DisplayNames {
    /// Get the display name of `player`, if one is known.
    fn display_name(&self, player: &PlayerId) -> Option<String>;

    /// Get the display name of `player`, falling back to [`UNKNOWN_NAME`].
    fn name_or_unknown(&self, player: &PlayerId) -> String {
        self.display_name(player).unwrap_or_else(|| UNKNOWN_NAME.to_owned())
    }
}

impl DisplayNames for HashMap<PlayerId, String> {
    fn display_name(&self, player: &PlayerId) -> Option<String> {
        self.get(player).cloned()
    }
}

/// Knows no names at all.
#[derive(Debug, Default, Copy, Clone)]
pub struct Anonymous;

impl DisplayNames for Anonymous {
    fn display_name(&self, _: &PlayerId) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_names_fall_back_to_unknown() {
        let mut names = HashMap::new();
        names.insert(PlayerId::from("alice"), "Alice".to_owned());
        assert_eq!(names.name_or_unknown(&PlayerId::from("alice")), "Alice");
        assert_eq!(names.name_or_unknown(&PlayerId::from("bob")), "Unknown");
        assert_eq!(Anonymous.name_or_unknown(&PlayerId::from("alice")), "Unknown");
    }
}
