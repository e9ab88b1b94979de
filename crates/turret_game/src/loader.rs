//! Background PNG decoding.
//!
//! Decoding happens on a worker thread; results come back over a channel and
//! are drained once per frame on the main thread, where the GPU upload has to
//! happen anyway.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Tightly packed RGBA8 pixels for one sprite key.
pub struct DecodedSprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub type LoadResult = (String, Result<DecodedSprite, AssetError>);

/// Read and decode `root/key` into RGBA8.
pub fn decode_sprite(root: &Path, key: &str) -> Result<DecodedSprite, AssetError> {
    let path = root.join(key);
    let bytes = fs::read(&path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    Ok(DecodedSprite {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub struct AssetLoader {
    receiver: Receiver<LoadResult>,
    worker: Option<JoinHandle<()>>,
}

impl AssetLoader {
    /// Start decoding `keys` in order on a worker thread.
    pub fn spawn(root: PathBuf, keys: Vec<String>) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let count = keys.len();
        let worker = thread::Builder::new()
            .name("sprite-loader".to_string())
            .spawn(move || {
                for key in keys {
                    let result = decode_sprite(&root, &key);
                    if sender.send((key, result)).is_err() {
                        // Receiver dropped, the app is shutting down.
                        break;
                    }
                }
            })?;
        log::info!("Sprite loader started with {} images", count);

        Ok(Self {
            receiver,
            worker: Some(worker),
        })
    }

    /// Everything decoded since the last call. Never blocks.
    pub fn drain(&mut self) -> Vec<LoadResult> {
        let mut out = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(result) => out.push(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if let Some(worker) = self.worker.take() {
                        if worker.join().is_err() {
                            log::error!("Sprite loader thread panicked");
                        } else {
                            log::info!("Sprite loader finished");
                        }
                    }
                    break;
                }
            }
        }
        out
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    fn temp_dir_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "turret_loader_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_png(root: &Path, key: &str, width: u32, height: u32) {
        let path = root.join(key);
        fs::create_dir_all(path.parent().expect("key has a parent")).expect("create dirs");
        image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");
    }

    #[test]
    fn decode_sprite_reads_png() {
        let root = temp_dir_path("decode");
        write_png(&root, "sprites/Icicle/1.png", 3, 2);

        let sprite = decode_sprite(&root, "sprites/Icicle/1.png").expect("should decode");
        assert_eq!((sprite.width, sprite.height), (3, 2));
        assert_eq!(sprite.rgba.len(), 3 * 2 * 4);
        assert_eq!(&sprite.rgba[..4], &[10, 20, 30, 255]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_file_is_io_error() {
        let root = temp_dir_path("missing");
        let err = decode_sprite(&root, "nope.png").err().expect("should fail");
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let root = temp_dir_path("garbage");
        fs::create_dir_all(&root).expect("create dir");
        fs::write(root.join("bad.png"), b"not an image").expect("write file");

        let err = decode_sprite(&root, "bad.png").err().expect("should fail");
        assert!(matches!(err, AssetError::Decode { .. }));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn loader_delivers_every_key() {
        let root = temp_dir_path("loader");
        write_png(&root, "a.png", 1, 1);
        write_png(&root, "b.png", 2, 2);

        let keys = vec!["a.png".to_string(), "b.png".to_string(), "c.png".to_string()];
        let mut loader = AssetLoader::spawn(root.clone(), keys).expect("spawn loader");

        let mut results = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while results.len() < 3 && Instant::now() < deadline {
            results.extend(loader.drain());
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "a.png");
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_ok());
        assert!(results[2].1.is_err());

        let _ = fs::remove_dir_all(root);
    }
}
