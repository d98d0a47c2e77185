use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A single photo shown in the carousel, the memory universe and the finale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Opaque resource reference handed to the renderer untouched.
    pub url: String,
    pub caption: String,
    pub date: String,
}

/// Glyph shown next to a milestone on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneIcon {
    Heart,
    Calendar,
    Home,
    PartyPopper,
    Laugh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub date: String,
    pub description: String,
    pub icon: MilestoneIcon,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Everything the presentation shows, supplied once at startup and shared
/// read-only by every scene.
///
/// Both lists may be empty; the scenes degrade instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Content {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The bundled sample set used when no content file is supplied.
    pub fn demo() -> Self {
        let photos = [
            ("two", "The moment we said yes", "December 4, 2024"),
            ("three", "Our special day", "February 17, 2025"),
            ("four", "Adventures together", "April 2025"),
            ("five", "Festival of lights", "October 2025"),
            ("six", "Laughter & joy", "December 2025"),
            ("seven", "Forever moments", "January 2026"),
            ("eight", "Moments of joy", "January 2026"),
            ("nine", "Together forever", "February 2026"),
            ("ten", "Creating memories", "February 2026"),
            ("eleven", "Our journey", "March 2026"),
            ("twelve", "Spring together", "April 2026"),
            ("thirteen", "Love grows", "May 2026"),
            ("fifteen", "Summer dreams", "July 2026"),
        ]
        .into_iter()
        .map(|(name, caption, date)| Photo {
            url: asset(name),
            caption: caption.to_string(),
            date: date.to_string(),
        })
        .collect();

        let milestones = vec![
            milestone(
                MilestoneIcon::Heart,
                "💍 Engagement Day",
                "December 4, 2024",
                "The day we promised forever to each other. A moment that changed our lives.",
                &["twelve", "fifteen"],
            ),
            milestone(
                MilestoneIcon::Calendar,
                "💒 Wedding Day",
                "February 17, 2025",
                "Surrounded by love, we became one. The most beautiful day of our lives.",
                &["seven", "nine"],
            ),
            milestone(
                MilestoneIcon::Home,
                "🏡 First Home Together",
                "June 2025",
                "Building our nest, creating our sanctuary. Where our love grows every day.",
                &[],
            ),
            milestone(
                MilestoneIcon::PartyPopper,
                "🎉 First Festival",
                "October 2025",
                "Celebrating traditions together. Lights, love, and laughter filled our home.",
                &["five", "six"],
            ),
            milestone(
                MilestoneIcon::Laugh,
                "😂 Funniest Moment",
                "November 2025",
                "That time we got lost on a road trip and found the best sunset spot!",
                &[],
            ),
            milestone(
                MilestoneIcon::Heart,
                "❤️ One Year Together",
                "February 17, 2026",
                "365 days of love, laughter, and endless memories. Here's to forever!",
                &["eight", "ten"],
            ),
        ];

        Self {
            cover_image: asset("one"),
            photos,
            milestones,
        }
    }
}

fn asset(name: &str) -> String {
    format!("/src/asset/{name}.jpeg")
}

fn milestone(
    icon: MilestoneIcon,
    title: &str,
    date: &str,
    description: &str,
    photos: &[&str],
) -> Milestone {
    Milestone {
        title: title.to_string(),
        date: date.to_string(),
        description: description.to_string(),
        icon,
        photos: photos.iter().map(|name| asset(name)).collect(),
    }
}
