//! Library under test
//!
//! Loads a freshly built `libcrypt.so` and calls its `crypt_ra` entry point.
//! Used only for methods that have no independent implementation.

use crate::error::{KatError, KatResult};
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::path::{Path, PathBuf};

/// Where the library lands in a libtool build tree, relative to its root.
pub const DEFAULT_LIBRARY_PATH: &str = ".libs/libcrypt.so";

/// `char *crypt_ra(const char *phrase, const char *setting, void **data, int *size)`
type CryptRaFn = unsafe extern "C" fn(
    *const c_char,
    *const c_char,
    *mut *mut c_void,
    *mut c_int,
) -> *mut c_char;

const CRYPT_RA: &[u8] = b"crypt_ra\0";

/// Scratch space `crypt_ra` allocates and grows on demand.
///
/// Each worker owns one. It is handed back to `crypt_ra` on every call and
/// released with `free` when the worker is done.
pub struct CryptScratch {
    data: *mut c_void,
    size: c_int,
}

impl CryptScratch {
    pub fn new() -> Self {
        Self {
            data: std::ptr::null_mut(),
            size: 0,
        }
    }
}

impl Default for CryptScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CryptScratch {
    fn drop(&mut self) {
        if !self.data.is_null() {
            // SAFETY: `data` was allocated by crypt_ra with malloc/realloc and
            // is not referenced anywhere else.
            unsafe { libc::free(self.data) };
            self.data = std::ptr::null_mut();
            self.size = 0;
        }
    }
}

/// Handle on the loaded library.
pub struct LibCrypt {
    library: libloading::Library,
    path: PathBuf,
}

impl LibCrypt {
    /// Load the library at `path` and check it exports `crypt_ra`.
    ///
    /// # Errors
    ///
    /// Returns `KatError::LibraryLoad` if the file cannot be loaded or lacks
    /// the entry point.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use katgen::library::{CryptScratch, LibCrypt};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let lib = LibCrypt::open(".libs/libcrypt.so")?;
    /// let mut scratch = CryptScratch::new();
    /// let hash = lib.crypt(&mut scratch, b"abc", b"$y$j75$.......")?;
    /// println!("{}", String::from_utf8_lossy(&hash));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> KatResult<Self> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initialisers; libcrypt has no
        // initialisers with preconditions.
        let library = unsafe { libloading::Library::new(path) }
            .map_err(|e| KatError::LibraryLoad(format!("{}: {}", path.display(), e)))?;
        // SAFETY: only the symbol's presence is checked here.
        unsafe { library.get::<CryptRaFn>(CRYPT_RA) }
            .map_err(|e| KatError::LibraryLoad(format!("{}: {}", path.display(), e)))?;

        log::info!("Loaded library under test: {}", path.display());
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hash `phrase` with `setting`.
    ///
    /// # Errors
    ///
    /// Returns `KatError::InvalidPhrase` if either string contains NUL, and
    /// `KatError::LibraryCall` if the library returns NULL or a failure
    /// token.
    pub fn crypt(
        &self,
        scratch: &mut CryptScratch,
        phrase: &[u8],
        setting: &[u8],
    ) -> KatResult<Vec<u8>> {
        let setting_text = String::from_utf8_lossy(setting).into_owned();
        let c_phrase = CString::new(phrase)
            .map_err(|_| KatError::InvalidPhrase(format!("{:?} contains NUL", phrase)))?;
        let c_setting = CString::new(setting)
            .map_err(|_| KatError::InvalidPhrase(format!("setting {:?} contains NUL", setting_text)))?;

        // SAFETY: the symbol was checked in `open` and has the declared
        // signature.
        let crypt_ra = unsafe { self.library.get::<CryptRaFn>(CRYPT_RA) }?;
        // SAFETY: both strings are NUL-terminated and outlive the call; the
        // scratch pair is either null/0 or what a previous call returned.
        let rv = unsafe {
            crypt_ra(
                c_phrase.as_ptr(),
                c_setting.as_ptr(),
                &mut scratch.data,
                &mut scratch.size,
            )
        };
        if rv.is_null() {
            return Err(KatError::LibraryCall {
                setting: setting_text,
                message: std::io::Error::last_os_error().to_string(),
            });
        }

        // SAFETY: a non-null return points into the scratch area and is
        // NUL-terminated.
        let output = unsafe { CStr::from_ptr(rv) }.to_bytes().to_vec();
        if output.first() == Some(&b'*') {
            return Err(KatError::LibraryCall {
                setting: setting_text,
                message: format!(
                    "failure token {}",
                    String::from_utf8_lossy(&output)
                ),
            });
        }
        Ok(output)
    }
}

impl std::fmt::Debug for LibCrypt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibCrypt").field("path", &self.path).finish()
    }
}
