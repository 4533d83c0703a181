//! Section identifiers for the sidebar.

use std::fmt;

/// One sidebar section, reachable by its hotkey (1-9, 0 for Logs, m for
/// Monitoring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Interfaces, // 2
    Dhcp,       // 3
    Routing,    // 4
    Vlans,      // 5
    Vrfs,       // 6
    Security,   // 7
    Qos,        // 8
    Terminal,   // 9
    Logs,       // 0
    Monitoring, // m
}

impl ScreenId {
    /// All sections in sidebar order.
    pub const ALL: [ScreenId; 11] = [
        Self::Dashboard,
        Self::Interfaces,
        Self::Dhcp,
        Self::Routing,
        Self::Vlans,
        Self::Vrfs,
        Self::Security,
        Self::Qos,
        Self::Terminal,
        Self::Logs,
        Self::Monitoring,
    ];

    /// Hotkey for this section.
    pub fn key(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Interfaces => '2',
            Self::Dhcp => '3',
            Self::Routing => '4',
            Self::Vlans => '5',
            Self::Vrfs => '6',
            Self::Security => '7',
            Self::Qos => '8',
            Self::Terminal => '9',
            Self::Logs => '0',
            Self::Monitoring => 'm',
        }
    }

    /// Section for a hotkey, if any.
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Next section in sidebar order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous section in sidebar order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Interfaces => "Interfaces",
            Self::Dhcp => "DHCP",
            Self::Routing => "Routing",
            Self::Vlans => "VLANs",
            Self::Vrfs => "VRFs",
            Self::Security => "Security",
            Self::Qos => "QoS",
            Self::Terminal => "Terminal",
            Self::Logs => "Logs",
            Self::Monitoring => "Monitoring",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkeys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_key(id.key()), Some(id));
        }
        assert_eq!(ScreenId::from_key('x'), None);
        assert_eq!(ScreenId::from_key('M'), None);
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(ScreenId::Logs.next(), ScreenId::Monitoring);
        assert_eq!(ScreenId::Monitoring.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Monitoring);
        assert_eq!(ScreenId::Dhcp.next().prev(), ScreenId::Dhcp);
    }
}
