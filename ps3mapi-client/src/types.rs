// PS3MAPI type definitions
//
// Enumerations for LED and buzzer control plus the process list entry type

use serde::{Deserialize, Serialize};

// Process ids are signed; -1 marks "no process attached"
pub type ProcessId = i64;

pub const UNBOUND_PROCESS: ProcessId = -1;

// LED colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LightColor {
    Red = 0,
    Green = 1,
    Yellow = 2,
}

impl LightColor {
    pub fn code(self) -> u8 {
        self as u8
    }
}

// LED modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LightMode {
    Off = 0,
    On = 1,
    BlinkFast = 2,
    BlinkSlow = 3,
}

impl LightMode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

// Buzzer beep patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BuzzerMode {
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl BuzzerMode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One entry of the console's process list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub id: ProcessId,
    pub label: String,
}

impl ProcessEntry {
    /// Homebrew executables show up with "EBOOT" in their label
    pub fn is_eboot(&self) -> bool {
        self.label.contains(crate::commands::markup::EBOOT_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_codes() {
        assert_eq!(LightColor::Red.code(), 0);
        assert_eq!(LightColor::Green.code(), 1);
        assert_eq!(LightColor::Yellow.code(), 2);

        assert_eq!(LightMode::Off.code(), 0);
        assert_eq!(LightMode::On.code(), 1);
        assert_eq!(LightMode::BlinkFast.code(), 2);
        assert_eq!(LightMode::BlinkSlow.code(), 3);
    }

    #[test]
    fn test_buzzer_codes() {
        // Buzzer modes start at 1, not 0
        assert_eq!(BuzzerMode::Single.code(), 1);
        assert_eq!(BuzzerMode::Double.code(), 2);
        assert_eq!(BuzzerMode::Triple.code(), 3);
    }

    #[test]
    fn test_serde_names() {
        let mode: LightMode = serde_json::from_str("\"blink_fast\"").unwrap();
        assert_eq!(mode, LightMode::BlinkFast);

        let color = serde_json::to_string(&LightColor::Yellow).unwrap();
        assert_eq!(color, "\"yellow\"");
    }

    #[test]
    fn test_eboot_label() {
        let entry = ProcessEntry { id: 1, label: "dev_hdd0/game/EBOOT.BIN".to_string() };
        assert!(entry.is_eboot());

        let entry = ProcessEntry { id: 2, label: "eboot.bin".to_string() };
        assert!(!entry.is_eboot());
    }
}
