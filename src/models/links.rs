use serde::{Deserialize, Serialize};

use super::{assign_text, present};

/// Download link and human-readable size for each published quality.
///
/// Flattened into movie and episode records, so the JSON keys are
/// `link360p`, `size360p`, ... `link1080p`, `size1080p`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityLinks {
    #[serde(default)]
    pub link_360p: Option<String>,
    #[serde(default)]
    pub link_480p: Option<String>,
    #[serde(default)]
    pub link_720p: Option<String>,
    #[serde(default)]
    pub link_1080p: Option<String>,
    #[serde(default)]
    pub size_360p: Option<String>,
    #[serde(default)]
    pub size_480p: Option<String>,
    #[serde(default)]
    pub size_720p: Option<String>,
    #[serde(default)]
    pub size_1080p: Option<String>,
}

impl QualityLinks {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            link_360p: present(self.link_360p),
            link_480p: present(self.link_480p),
            link_720p: present(self.link_720p),
            link_1080p: present(self.link_1080p),
            size_360p: present(self.size_360p),
            size_480p: present(self.size_480p),
            size_720p: present(self.size_720p),
            size_1080p: present(self.size_1080p),
        }
    }

    pub fn merge(&mut self, patch: Self) {
        assign_text(&mut self.link_360p, patch.link_360p);
        assign_text(&mut self.link_480p, patch.link_480p);
        assign_text(&mut self.link_720p, patch.link_720p);
        assign_text(&mut self.link_1080p, patch.link_1080p);
        assign_text(&mut self.size_360p, patch.size_360p);
        assign_text(&mut self.size_480p, patch.size_480p);
        assign_text(&mut self.size_720p, patch.size_720p);
        assign_text(&mut self.size_1080p, patch.size_1080p);
    }
}
