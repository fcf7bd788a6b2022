//! Crop rectangles and their two-level override resolution.

use serde::{Deserialize, Serialize};

/// A four-sided pixel border removed during transcoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Rect {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// `top:bottom:left:right`, the form the transcoder takes.
    pub fn to_arg(&self) -> String {
        format!("{}:{}:{}:{}", self.top, self.bottom, self.left, self.right)
    }
}

/// Disc-level crop policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscCropChoice {
    #[default]
    Automatic,
    Custom,
}

/// Title-level crop policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleCropChoice {
    /// Inherit whatever the disc resolves to.
    #[default]
    Default,
    Automatic,
    Custom,
}

/// Which policy produced a resolved crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPolicy {
    /// The probe-detected crop; the transcoder finds it on its own.
    Automatic,
    /// A user-entered rectangle that must be passed explicitly.
    Custom,
}

/// The crop that applies to a title after override resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCrop {
    pub rect: Rect,
    pub policy: CropPolicy,
}

impl ResolvedCrop {
    /// The rectangle to pass explicitly, if the winning policy is custom.
    pub fn override_rect(&self) -> Option<Rect> {
        match self.policy {
            CropPolicy::Custom => Some(self.rect),
            CropPolicy::Automatic => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscCrop {
    #[serde(default)]
    pub process_choice: DiscCropChoice,
    #[serde(flatten)]
    pub rect: Rect,
}

impl DiscCrop {
    /// Copy the dimensions of another rectangle; the policy is untouched.
    pub fn copy(&mut self, other: &Rect) {
        self.rect = *other;
    }

    /// Resolve against a title's probe-detected crop.
    pub fn resolve(&self, auto_crop: &Rect) -> ResolvedCrop {
        match self.process_choice {
            DiscCropChoice::Automatic => ResolvedCrop {
                rect: *auto_crop,
                policy: CropPolicy::Automatic,
            },
            DiscCropChoice::Custom => ResolvedCrop {
                rect: self.rect,
                policy: CropPolicy::Custom,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCrop {
    #[serde(default)]
    pub process_choice: TitleCropChoice,
    #[serde(flatten)]
    pub rect: Rect,
}

impl TitleCrop {
    /// Copy the dimensions of another rectangle; the policy is untouched.
    pub fn copy(&mut self, other: &Rect) {
        self.rect = *other;
    }

    pub fn is_custom(&self) -> bool {
        self.process_choice == TitleCropChoice::Custom
    }

    /// True when the title carries its own rectangle or policy.
    pub fn is_dirty(&self) -> bool {
        self.process_choice != TitleCropChoice::Default || self.rect != Rect::default()
    }

    /// Back to inheriting the disc crop with an empty rectangle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolve the crop for a title with the given probe-detected crop.
    pub fn resolve(&self, auto_crop: &Rect, disc: &DiscCrop) -> ResolvedCrop {
        match self.process_choice {
            TitleCropChoice::Default => disc.resolve(auto_crop),
            TitleCropChoice::Automatic => ResolvedCrop {
                rect: *auto_crop,
                policy: CropPolicy::Automatic,
            },
            TitleCropChoice::Custom => ResolvedCrop {
                rect: self.rect,
                policy: CropPolicy::Custom,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: Rect = Rect::new(60, 62, 0, 2);

    #[test]
    fn test_default_title_matches_disc_resolution() {
        let title = TitleCrop::default();
        for choice in [DiscCropChoice::Automatic, DiscCropChoice::Custom] {
            let disc = DiscCrop {
                process_choice: choice,
                rect: Rect::new(1, 2, 3, 4),
            };
            assert_eq!(title.resolve(&AUTO, &disc), disc.resolve(&AUTO));
        }
    }

    #[test]
    fn test_title_policies() {
        let disc = DiscCrop {
            process_choice: DiscCropChoice::Custom,
            rect: Rect::new(1, 2, 3, 4),
        };
        let mut title = TitleCrop {
            process_choice: TitleCropChoice::Automatic,
            rect: Rect::new(8, 8, 8, 8),
        };

        let resolved = title.resolve(&AUTO, &disc);
        assert_eq!(resolved.rect, AUTO);
        assert_eq!(resolved.override_rect(), None);

        title.process_choice = TitleCropChoice::Custom;
        assert_eq!(
            title.resolve(&AUTO, &disc).override_rect(),
            Some(Rect::new(8, 8, 8, 8))
        );
    }

    #[test]
    fn test_copy_keeps_policy() {
        let mut title = TitleCrop::default();
        title.copy(&AUTO);
        assert_eq!(title.process_choice, TitleCropChoice::Default);
        assert_eq!(title.rect, AUTO);
        assert!(title.is_dirty());

        title.reset();
        assert!(!title.is_dirty());
    }

    #[test]
    fn test_rect_arg() {
        assert_eq!(AUTO.to_arg(), "60:62:0:2");
    }
}
