use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level grouping of the tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ToolCategory {
    #[serde(rename = "PDF")]
    Pdf,
    Image,
    Media,
    Government,
    Developer,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 5] = [
        ToolCategory::Pdf,
        ToolCategory::Image,
        ToolCategory::Media,
        ToolCategory::Government,
        ToolCategory::Developer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Pdf => "PDF",
            ToolCategory::Image => "Image",
            ToolCategory::Media => "Media",
            ToolCategory::Government => "Government",
            ToolCategory::Developer => "Developer",
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ToolCategory::Pdf),
            "image" => Ok(ToolCategory::Image),
            "media" => Ok(ToolCategory::Media),
            "government" => Ok(ToolCategory::Government),
            "developer" => Ok(ToolCategory::Developer),
            _ => Err(format!("Invalid tool category: {}", s)),
        }
    }
}
