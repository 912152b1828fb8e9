//! Platform system services injectable with `@system-service`.

use indexmap::IndexMap;
use tagsmith_core::simple_name;

/// Service type to `Context` constant table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemServices {
    services: IndexMap<String, String>,
}

const STANDARD: &[(&str, &str)] = &[
    ("android.accounts.AccountManager", "ACCOUNT_SERVICE"),
    ("android.app.ActivityManager", "ACTIVITY_SERVICE"),
    ("android.app.AlarmManager", "ALARM_SERVICE"),
    ("android.app.KeyguardManager", "KEYGUARD_SERVICE"),
    ("android.app.NotificationManager", "NOTIFICATION_SERVICE"),
    ("android.app.SearchManager", "SEARCH_SERVICE"),
    ("android.content.ClipboardManager", "CLIPBOARD_SERVICE"),
    ("android.hardware.SensorManager", "SENSOR_SERVICE"),
    ("android.location.LocationManager", "LOCATION_SERVICE"),
    ("android.media.AudioManager", "AUDIO_SERVICE"),
    ("android.net.ConnectivityManager", "CONNECTIVITY_SERVICE"),
    ("android.net.wifi.WifiManager", "WIFI_SERVICE"),
    ("android.os.PowerManager", "POWER_SERVICE"),
    ("android.os.Vibrator", "VIBRATOR_SERVICE"),
    ("android.telephony.TelephonyManager", "TELEPHONY_SERVICE"),
    ("android.view.LayoutInflater", "LAYOUT_INFLATER_SERVICE"),
    ("android.view.WindowManager", "WINDOW_SERVICE"),
    (
        "android.view.inputmethod.InputMethodManager",
        "INPUT_METHOD_SERVICE",
    ),
];

impl SystemServices {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            services: IndexMap::new(),
        }
    }

    /// The platform's standard services.
    pub fn standard() -> Self {
        let mut services = Self::empty();
        for (ty, constant) in STANDARD {
            services.register(*ty, *constant);
        }
        services
    }

    /// Register a service type under a `Context` constant.
    pub fn register(&mut self, ty: impl Into<String>, constant: impl Into<String>) {
        self.services.insert(ty.into(), constant.into());
    }

    /// `Context` constant for a service type, given qualified or simple.
    pub fn constant_for(&self, ty: &str) -> Option<&str> {
        if let Some(constant) = self.services.get(ty) {
            return Some(constant);
        }
        self.services
            .iter()
            .find(|(qualified, _)| simple_name(qualified) == ty)
            .map(|(_, constant)| constant.as_str())
    }

    /// Qualified service type for a type given qualified or simple.
    pub fn qualified(&self, ty: &str) -> Option<&str> {
        self.services
            .keys()
            .find(|qualified| qualified.as_str() == ty || simple_name(qualified) == ty)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for SystemServices {
    fn default() -> Self {
        Self::standard()
    }
}
