use std::path::Path;
use std::process::Command;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("wallpaper path must be absolute: {0}")]
    RelativePath(String),
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("operating system refused the wallpaper: {0}")]
    Os(String),
    #[error("setting the wallpaper is not supported on {0}")]
    UnsupportedPlatform(String),
}

/// Sets a file as the desktop background. One implementation per platform.
pub trait WallpaperSetter: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, path: &Path) -> Result<(), ApplyError>;
}

/// GNOME-style desktops: writes the picture URI through `gsettings`.
#[derive(Debug, Clone)]
pub struct GnomeSetter {
    program: String,
}

impl Default for GnomeSetter {
    fn default() -> Self {
        Self::with_program("gsettings")
    }
}

impl GnomeSetter {
    const SCHEMA: &'static str = "org.gnome.desktop.background";

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `file://` URI for an absolute path, percent-encoded where needed.
    pub fn picture_uri(path: &Path) -> Result<String, ApplyError> {
        url::Url::from_file_path(path)
            .map(|uri| uri.to_string())
            .map_err(|()| ApplyError::RelativePath(path.display().to_string()))
    }

    pub fn command_args(key: &str, uri: &str) -> Vec<String> {
        vec![
            "set".to_string(),
            Self::SCHEMA.to_string(),
            key.to_string(),
            uri.to_string(),
        ]
    }

    fn set_key(&self, key: &str, uri: &str) -> Result<(), ApplyError> {
        let args = Self::command_args(key, uri);
        engine_debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ApplyError::Io {
                program: self.program.clone(),
                source,
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ApplyError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl WallpaperSetter for GnomeSetter {
    fn name(&self) -> &'static str {
        "gnome"
    }

    fn apply(&self, path: &Path) -> Result<(), ApplyError> {
        let uri = Self::picture_uri(path)?;
        self.set_key("picture-uri", &uri)?;
        // Older GNOME releases have no dark variant key.
        if let Err(err) = self.set_key("picture-uri-dark", &uri) {
            engine_warn!("Could not set dark-mode wallpaper: {}", err);
        }
        Ok(())
    }
}

/// Windows: `SystemParametersInfoW(SPI_SETDESKWALLPAPER, ...)` with an
/// immediate broadcast of the change.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsSetter;

#[cfg(windows)]
impl WallpaperSetter for WindowsSetter {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn apply(&self, path: &Path) -> Result<(), ApplyError> {
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
        };

        if !path.is_absolute() {
            return Err(ApplyError::RelativePath(path.display().to_string()));
        }
        let mut wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: `wide` is a NUL-terminated UTF-16 buffer that outlives the call.
        let ok = unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                wide.as_mut_ptr().cast(),
                SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
            )
        };
        if ok == 0 {
            return Err(ApplyError::Os(std::io::Error::last_os_error().to_string()));
        }
        Ok(())
    }
}

/// Reports that no wallpaper mechanism is known for this platform.
#[derive(Debug, Clone)]
pub struct UnsupportedSetter {
    platform: String,
}

impl UnsupportedSetter {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }
}

impl WallpaperSetter for UnsupportedSetter {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn apply(&self, _path: &Path) -> Result<(), ApplyError> {
        Err(ApplyError::UnsupportedPlatform(self.platform.clone()))
    }
}

#[cfg(windows)]
pub fn platform_setter() -> Box<dyn WallpaperSetter> {
    Box::new(WindowsSetter)
}

#[cfg(all(unix, not(target_os = "macos")))]
pub fn platform_setter() -> Box<dyn WallpaperSetter> {
    Box::new(GnomeSetter::default())
}

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub fn platform_setter() -> Box<dyn WallpaperSetter> {
    Box::new(UnsupportedSetter::new(std::env::consts::OS))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ApplyError, GnomeSetter, UnsupportedSetter, WallpaperSetter};

    #[test]
    fn gsettings_arguments_target_background_schema() {
        let args = GnomeSetter::command_args("picture-uri", "file:///home/u/a.jpg");
        assert_eq!(
            args,
            vec![
                "set",
                "org.gnome.desktop.background",
                "picture-uri",
                "file:///home/u/a.jpg"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn picture_uri_is_file_scheme_and_encoded() {
        let uri = GnomeSetter::picture_uri(Path::new("/home/u/Pictures/my wall.jpg")).unwrap();
        assert_eq!(uri, "file:///home/u/Pictures/my%20wall.jpg");
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = GnomeSetter::picture_uri(Path::new("relative.jpg")).unwrap_err();
        assert!(matches!(err, ApplyError::RelativePath(_)));
    }

    #[cfg(unix)]
    #[test]
    fn command_exit_status_is_reported() {
        let path = Path::new("/tmp/wall.jpg");
        assert!(GnomeSetter::with_program("true").apply(path).is_ok());

        let err = GnomeSetter::with_program("false").apply(path).unwrap_err();
        assert!(matches!(err, ApplyError::CommandFailed { .. }));
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let err = GnomeSetter::with_program("definitely-not-a-real-program-4242")
            .apply(Path::new(if cfg!(windows) { r"C:\w.jpg" } else { "/w.jpg" }))
            .unwrap_err();
        assert!(matches!(err, ApplyError::Io { .. }));
    }

    #[test]
    fn unsupported_platform_is_explicit() {
        let err = UnsupportedSetter::new("plan9")
            .apply(Path::new("/w.jpg"))
            .unwrap_err();
        assert_eq!(err.to_string(), "setting the wallpaper is not supported on plan9");
    }
}
