// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Device emulation presets
//!
//! The target site serves different markup per device class, so both
//! sources identify as a named device: the plain source through its
//! user agent, the browser source through user agent and window size.

/// A named device to emulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub width: u32,
    pub height: u32,
    /// `navigator.platform` reported by the browser source
    pub platform: &'static str,
}

const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1";

/// Known devices, matched case-insensitively by name
pub const DEVICES: &[DeviceProfile] = &[
    DeviceProfile {
        name: "iPhone 12 Pro",
        user_agent: IPHONE_UA,
        width: 390,
        height: 844,
        platform: "iPhone",
    },
    DeviceProfile {
        name: "iPhone SE",
        user_agent: IPHONE_UA,
        width: 375,
        height: 667,
        platform: "iPhone",
    },
    DeviceProfile {
        name: "Pixel 5",
        user_agent: "Mozilla/5.0 (Linux; Android 11; Pixel 5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        width: 393,
        height: 851,
        platform: "Linux armv8l",
    },
    DeviceProfile {
        name: "Samsung Galaxy S20 Ultra",
        user_agent: "Mozilla/5.0 (Linux; Android 10; SM-G988B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        width: 412,
        height: 915,
        platform: "Linux armv8l",
    },
    DeviceProfile {
        name: "iPad Air",
        user_agent: "Mozilla/5.0 (iPad; CPU OS 13_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.0.3 Mobile/15E148 Safari/604.1",
        width: 820,
        height: 1180,
        platform: "iPad",
    },
];

impl DeviceProfile {
    /// Find a device by name
    pub fn lookup(name: &str) -> Option<&'static DeviceProfile> {
        let name = name.trim();
        DEVICES.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Comma-separated list of known device names
    pub fn known_names() -> String {
        DEVICES
            .iter()
            .map(|d| d.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
