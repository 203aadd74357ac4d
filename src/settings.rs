//! Display, Audio and Input Settings
//!
//! Holds the flat bag of user-adjustable options shown on the options
//! screen, plus the frame-rate cap table. Settings live in memory only
//! and reset on restart.

/// A selectable display resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    /// Display label, e.g. "1280x720"
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Used when the video subsystem cannot enumerate display modes.
pub const FALLBACK_RESOLUTIONS: [Resolution; 5] = [
    Resolution { width: 1920, height: 1080 },
    Resolution { width: 1600, height: 900 },
    Resolution { width: 1366, height: 768 },
    Resolution { width: 1280, height: 720 },
    Resolution { width: 1024, height: 768 },
];

/// Frame-rate cap selection.
///
/// Each option maps to its effective numeric cap through [`cap`], so the
/// cap never has to be recovered from a display label.
///
/// [`cap`]: FrameRateOption::cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRateOption {
    Uncapped,
    Fps30,
    Fps60,
    Fps90,
    Fps120,
    Fps144,
    Fps240,
    Custom,
}

/// Adjustment range for the custom frame-rate slider.
pub const CUSTOM_FRAME_RATE_MIN: i32 = 30;
pub const CUSTOM_FRAME_RATE_MAX: i32 = 400;

impl FrameRateOption {
    /// All options, in the order they appear in the options screen.
    pub fn all() -> [FrameRateOption; 8] {
        [
            FrameRateOption::Uncapped,
            FrameRateOption::Fps30,
            FrameRateOption::Fps60,
            FrameRateOption::Fps90,
            FrameRateOption::Fps120,
            FrameRateOption::Fps144,
            FrameRateOption::Fps240,
            FrameRateOption::Custom,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrameRateOption::Uncapped => "Uncapped",
            FrameRateOption::Fps30 => "30",
            FrameRateOption::Fps60 => "60",
            FrameRateOption::Fps90 => "90",
            FrameRateOption::Fps120 => "120",
            FrameRateOption::Fps144 => "144",
            FrameRateOption::Fps240 => "240",
            FrameRateOption::Custom => "Custom",
        }
    }

    /// Effective cap in frames per second. `None` means uncapped.
    pub fn cap(&self, custom: u32) -> Option<u32> {
        match self {
            FrameRateOption::Uncapped => None,
            FrameRateOption::Fps30 => Some(30),
            FrameRateOption::Fps60 => Some(60),
            FrameRateOption::Fps90 => Some(90),
            FrameRateOption::Fps120 => Some(120),
            FrameRateOption::Fps144 => Some(144),
            FrameRateOption::Fps240 => Some(240),
            FrameRateOption::Custom => Some(custom),
        }
    }
}

/// User-adjustable options.
///
/// No cross-field invariants; each field is clamped by the widget that
/// edits it. Fullscreen state is owned by the display, not duplicated
/// here.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Index into the resolution list shown on the options screen
    pub resolution_index: usize,

    /// Selected frame-rate cap
    pub frame_rate: FrameRateOption,

    /// Cap used when `frame_rate` is `Custom`
    pub custom_frame_rate: u32,

    /// Vertical sync
    pub vsync: bool,

    /// Master volume, 0-100
    pub master_volume: i32,

    /// Effects volume, 0-100
    pub fx_volume: i32,

    /// Mouse sensitivity, 0-100
    pub mouse_sensitivity: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            resolution_index: 0,
            frame_rate: FrameRateOption::Fps60,
            custom_frame_rate: 60,
            vsync: false,
            master_volume: 77,
            fx_volume: 77,
            mouse_sensitivity: 77,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_table_maps_every_option() {
        assert_eq!(FrameRateOption::Uncapped.cap(999), None);
        assert_eq!(FrameRateOption::Fps30.cap(999), Some(30));
        assert_eq!(FrameRateOption::Fps60.cap(999), Some(60));
        assert_eq!(FrameRateOption::Fps90.cap(999), Some(90));
        assert_eq!(FrameRateOption::Fps120.cap(999), Some(120));
        assert_eq!(FrameRateOption::Fps144.cap(999), Some(144));
        assert_eq!(FrameRateOption::Fps240.cap(999), Some(240));
        assert_eq!(FrameRateOption::Custom.cap(85), Some(85));
    }

    #[test]
    fn test_custom_cap_follows_slider_value() {
        let mut settings = Settings::default();
        settings.frame_rate = FrameRateOption::Custom;
        settings.custom_frame_rate = 144;
        assert_eq!(
            settings.frame_rate.cap(settings.custom_frame_rate),
            Some(144)
        );
    }

    #[test]
    fn test_all_options_have_distinct_labels() {
        let options = FrameRateOption::all();
        for (i, a) in options.iter().enumerate() {
            for b in options.iter().skip(i + 1) {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.frame_rate, FrameRateOption::Fps60);
        assert_eq!(settings.master_volume, 77);
        assert!(!settings.vsync);
    }

    #[test]
    fn test_resolution_label() {
        assert_eq!(Resolution::new(1280, 720).label(), "1280x720");
    }
}
