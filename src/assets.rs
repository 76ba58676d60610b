//! Best-effort image loading.
//!
//! Image sources load on background threads, one task per locator. A task
//! either decodes its image or logs the failure and is skipped; nothing
//! aborts startup. The batch settles once every attempt has finished,
//! successful or not, and the settled result gates only the initial
//! particle seeding.
//!
//! There is no cancellation: a batch whose result is no longer wanted
//! settles anyway and is simply dropped.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::warn;

use crate::config::ImageLocator;
use crate::error::AssetError;

/// A decoded image ready for a rendering backend to upload.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Source name, for log messages and debugging.
    pub name: String,
    /// Tightly packed RGBA8 pixels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decode one image source into RGBA8.
pub(crate) fn decode(locator: &ImageLocator) -> Result<LoadedImage, AssetError> {
    let (name, image) = match locator {
        ImageLocator::Path(path) => (path.display().to_string(), image::open(path)?),
        ImageLocator::Embedded { name, bytes } => {
            (name.clone(), image::load_from_memory(bytes)?)
        }
    };
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        name,
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// An in-flight batch of image loads.
pub struct ImageLoader {
    receiver: Receiver<Vec<LoadedImage>>,
}

impl ImageLoader {
    /// Start loading every locator on background threads.
    ///
    /// An empty locator list settles immediately with an empty batch, which
    /// the animator treats as glyph mode.
    pub fn spawn(locators: Vec<ImageLocator>) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let tasks: Vec<_> = locators
                .into_iter()
                .map(|locator| {
                    thread::spawn(move || match decode(&locator) {
                        Ok(image) => Some(image),
                        Err(e) => {
                            warn!("skipping image {}: {}", locator, e);
                            None
                        }
                    })
                })
                .collect();

            // All-settled barrier: wait for every attempt, keep successes.
            let loaded: Vec<LoadedImage> = tasks
                .into_iter()
                .filter_map(|task| task.join().ok().flatten())
                .collect();

            // The receiver may be gone if the overlay shut down early.
            let _ = sender.send(loaded);
        });

        Self { receiver }
    }

    /// The settled batch, if every load attempt has finished.
    ///
    /// Non-blocking; call once per frame until it yields.
    pub fn try_settle(&self) -> Option<Vec<LoadedImage>> {
        self.receiver.try_recv().ok()
    }

    /// Block until the batch settles.
    pub fn settle(self) -> Vec<LoadedImage> {
        self.receiver.recv().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_embedded_image_decodes() {
        let locator = ImageLocator::Embedded {
            name: "dot".into(),
            bytes: png_bytes(2, 3),
        };
        let loaded = decode(&locator).unwrap();
        assert_eq!(loaded.name, "dot");
        assert_eq!((loaded.width, loaded.height), (2, 3));
        assert_eq!(loaded.pixels.len(), 2 * 3 * 4);
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let locator = ImageLocator::Embedded {
            name: "junk".into(),
            bytes: vec![1, 2, 3, 4],
        };
        assert!(decode(&locator).is_err());
    }

    #[test]
    fn test_failed_loads_settle_to_empty_batch() {
        let loader = ImageLoader::spawn(vec![
            ImageLocator::Path("does/not/exist.png".into()),
            ImageLocator::Embedded {
                name: "junk".into(),
                bytes: vec![0; 8],
            },
        ]);
        assert!(loader.settle().is_empty());
    }

    #[test]
    fn test_mixed_batch_keeps_successes() {
        let loader = ImageLoader::spawn(vec![
            ImageLocator::Embedded {
                name: "ok".into(),
                bytes: png_bytes(4, 4),
            },
            ImageLocator::Path("missing.png".into()),
        ]);
        let loaded = loader.settle();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "ok");
    }

    #[test]
    fn test_empty_locator_list_settles_immediately() {
        let loader = ImageLoader::spawn(Vec::new());
        assert!(loader.settle().is_empty());
    }
}
