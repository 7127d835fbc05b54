use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Settings {
    inner: FxHashMap<Setting, bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            inner: FxHashMap::default(),
        }
    }

    pub fn enable(&mut self, setting: Setting) {
        self.inner.insert(setting, true);
    }

    pub fn disable(&mut self, setting: Setting) {
        self.inner.insert(setting, false);
    }

    pub fn set(&mut self, setting: Setting, enabled: bool) {
        self.inner.insert(setting, enabled);
    }

    pub fn is_enabled(&self, setting: &Setting) -> bool {
        match self.inner.get(setting) {
            Some(v) => *v,
            _ => false,
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        let mut settings = Settings::new();

        settings.enable(Setting::EmitTrace);
        settings.enable(Setting::EmitCode);
        settings.disable(Setting::Debug);

        settings
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Setting {
    /// Write the parse-tree trace (`.xml`).
    EmitTrace,
    /// Write the VM program (`.vm`).
    EmitCode,
    /// Dump the token stream while compiling.
    Debug,
}

impl std::fmt::Display for Setting {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let name = match self {
            Setting::EmitTrace => "emit-trace",
            Setting::EmitCode => "emit-code",
            Setting::Debug => "debug",
        };

        fmt.write_str(name)
    }
}
