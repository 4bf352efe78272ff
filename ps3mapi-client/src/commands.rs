// PS3MAPI command paths and query parameter names
//
// webMAN MOD serves every command as a GET against a fixed path relative to
// http://<host>/ :
// home.ps3mapi    = process list (attach)
// shutdown.ps3    = power off
// reboot.ps3      = hard reboot
// notify.ps3mapi  = on-screen notification
// led.ps3mapi     = LED control
// buzzer.ps3mapi  = buzzer control
// setidps.ps3mapi = IDPS/PSID spoofing
// setmem.ps3mapi  = process memory write
// getmem.ps3mapi  = process memory read

// Command paths
pub mod paths {
    pub const HOME: &str = "home.ps3mapi";
    pub const SHUTDOWN: &str = "shutdown.ps3";
    pub const REBOOT: &str = "reboot.ps3";
    pub const NOTIFY: &str = "notify.ps3mapi";
    pub const LED: &str = "led.ps3mapi";
    pub const BUZZER: &str = "buzzer.ps3mapi";
    pub const SET_ID: &str = "setidps.ps3mapi";
    pub const SET_MEMORY: &str = "setmem.ps3mapi";
    pub const GET_MEMORY: &str = "getmem.ps3mapi";
}

// Query parameter names
pub mod params {
    pub const MESSAGE: &str = "msg";
    pub const COLOR: &str = "color";
    pub const MODE: &str = "mode";
    pub const IDPS1: &str = "idps1";
    pub const IDPS2: &str = "idps2";
    pub const PSID1: &str = "psid1";
    pub const PSID2: &str = "psid2";
    pub const PROCESS: &str = "proc";
    pub const ADDRESS: &str = "addr";
    pub const VALUE: &str = "val";
    pub const LENGTH: &str = "len";
}

// HTML markers the service renders into its responses
pub mod markup {
    /// Tag of the process selection widget on the home page
    pub const PROCESS_GROUP_TAG: &str = "select";
    /// Label substring identifying a homebrew executable
    pub const EBOOT_MARKER: &str = "EBOOT";
    /// Id of the element carrying a memory read result
    pub const MEMORY_OUTPUT_ID: &str = "output";
}

/// Notification shown on the console when a client connects
pub const CONNECT_BANNER: &str = "PS3MAPI Device Connected";
