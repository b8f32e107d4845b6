use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file not found: {0}")]
    Missing(PathBuf),
    #[error("model {name} is not cached and no download URL is configured (set {env})")]
    NoSource { name: String, env: &'static str },
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where to look for a model, in priority order.
#[derive(Debug, Default, Clone)]
pub struct ModelSource<'a> {
    /// An explicit file chosen by the user; must exist.
    pub explicit: Option<&'a Path>,
    /// Directory shipped alongside the binary.
    pub bundled_dir: Option<&'a Path>,
    /// Download location used when nothing local is found.
    pub url: Option<&'a str>,
}

/// Resolve a model file by name.
///
/// Resolution order:
/// 1. Explicit path
/// 2. User cache directory (platform-specific)
/// 3. Bundled directory
/// 4. Download from URL into the cache
pub fn resolve(
    name: &str,
    source: &ModelSource<'_>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = source.explicit {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(ModelResolveError::Missing(path.to_path_buf()))
        };
    }

    let cache_dir = model_cache_dir()?;
    resolve_in(name, &cache_dir, source, progress)
}

fn resolve_in(
    name: &str,
    cache_dir: &Path,
    source: &ModelSource<'_>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Model {name} found in cache");
        return Ok(cached_path);
    }

    if let Some(dir) = source.bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            log::debug!("Model {name} found in bundled dir");
            return Ok(bundled_path);
        }
    }

    let url = source.url.ok_or_else(|| ModelResolveError::NoSource {
        name: name.to_string(),
        env: crate::shared::constants::EMBEDDING_MODEL_URL_ENV,
    })?;

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/DeepShield/models/`
/// - Linux: `$XDG_CACHE_HOME/DeepShield/models/` or `~/.cache/DeepShield/models/`
/// - Windows: `%LOCALAPPDATA%/DeepShield/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("DeepShield").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("DeepShield").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let download_err = |e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    };
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;

    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(download_err)?;

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e| ModelResolveError::Write { path, source: e }
    };
    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;

    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(1024 * 1024) {
        if let Err(e) = file.write_all(chunk) {
            drop(file);
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(&temp_path)(e));
        }
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err(&temp_path))?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(write_err(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let model = tmp.path().join("custom.onnx");
        fs::write(&model, b"model").unwrap();

        let source = ModelSource {
            explicit: Some(&model),
            ..Default::default()
        };
        assert_eq!(resolve("facenet512.onnx", &source, None).unwrap(), model);
    }

    #[test]
    fn test_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let model = tmp.path().join("absent.onnx");
        let source = ModelSource {
            explicit: Some(&model),
            ..Default::default()
        };
        assert!(matches!(
            resolve("facenet512.onnx", &source, None),
            Err(ModelResolveError::Missing(_))
        ));
    }

    #[test]
    fn test_cache_hit_before_bundled() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&cache).unwrap();
        fs::create_dir_all(&bundled).unwrap();
        fs::write(cache.join("m.onnx"), b"cached").unwrap();
        fs::write(bundled.join("m.onnx"), b"bundled").unwrap();

        let source = ModelSource {
            bundled_dir: Some(&bundled),
            ..Default::default()
        };
        let path = resolve_in("m.onnx", &cache, &source, None).unwrap();
        assert_eq!(path, cache.join("m.onnx"));
    }

    #[test]
    fn test_bundled_used_when_cache_empty() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join("m.onnx"), b"bundled").unwrap();

        let source = ModelSource {
            bundled_dir: Some(&bundled),
            ..Default::default()
        };
        let path = resolve_in("m.onnx", &cache, &source, None).unwrap();
        assert_eq!(path, bundled.join("m.onnx"));
    }

    #[test]
    fn test_no_url_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_in("m.onnx", tmp.path(), &ModelSource::default(), None).unwrap_err();
        assert!(matches!(err, ModelResolveError::NoSource { .. }));
        assert!(err.to_string().contains("DEEPSHIELD_MODEL_URL"));
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("DeepShield"));
        assert!(path.ends_with("models"));
    }

    #[test]
    fn test_download_invalid_url_leaves_no_partial() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
