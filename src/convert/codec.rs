use crate::convert::types::ConvertError;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const SOURCE_EXTENSION: &str = "heic";
pub const OUTPUT_EXTENSION: &str = "jpg";
pub const JPEG_QUALITY: u8 = 95;

/// Turns one source image into a JPEG on disk.
pub trait ImageCodec: Send + Sync {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError>;
}

/// libheif decoder feeding the `image` JPEG encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeifJpegCodec;

impl HeifJpegCodec {
    fn decode(&self, input: &Path) -> Result<RgbImage, ConvertError> {
        let lib_heif = LibHeif::new();

        let ctx = HeifContext::read_from_file(input.to_string_lossy().as_ref())
            .map_err(|e| ConvertError::Decode(format!("cannot read container: {}", e)))?;

        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ConvertError::Decode(format!("no primary image: {}", e)))?;

        // Interleaved 8-bit RGB drops any alpha channel.
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| ConvertError::Decode(e.to_string()))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ConvertError::Decode("no interleaved RGB plane".to_string()))?;

        let pixels = pack_rows(plane.data, plane.stride, plane.width, plane.height)
            .ok_or_else(|| ConvertError::Decode("truncated RGB plane".to_string()))?;

        RgbImage::from_raw(plane.width, plane.height, pixels)
            .ok_or_else(|| ConvertError::Decode("pixel buffer size mismatch".to_string()))
    }

    /// A failed write removes the partial file so the input is retried on the
    /// next run instead of being skipped.
    fn encode(&self, image: &RgbImage, output: &Path) -> Result<(), ConvertError> {
        let result = Self::write_jpeg(image, output);
        if result.is_err() {
            let _ = fs::remove_file(output);
        }
        result
    }

    fn write_jpeg(image: &RgbImage, output: &Path) -> Result<(), ConvertError> {
        let mut writer = BufWriter::new(File::create(output)?);
        JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(image)?;
        writer.flush()?;
        Ok(())
    }
}

impl ImageCodec for HeifJpegCodec {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        let image = self.decode(input)?;
        self.encode(&image, output)
    }
}

/// Copies `height` rows of `width` RGB pixels out of a plane whose rows are
/// `stride` bytes apart. Returns `None` if the plane is too short.
fn pack_rows(data: &[u8], stride: usize, width: u32, height: u32) -> Option<Vec<u8>> {
    let row_len = width as usize * 3;
    let height = height as usize;
    if stride < row_len {
        return None;
    }
    if stride == row_len {
        return data.get(..row_len * height).map(<[u8]>::to_vec);
    }

    let mut pixels = Vec::with_capacity(row_len * height);
    for row in 0..height {
        let start = row * stride;
        pixels.extend_from_slice(data.get(start..start + row_len)?);
    }
    Some(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pack_rows_passes_tight_planes_through() {
        let data: Vec<u8> = (0..12).collect();
        assert_eq!(pack_rows(&data, 6, 2, 2), Some(data.clone()));
    }

    #[test]
    fn pack_rows_strips_row_padding() {
        // 1x2 image, 3 bytes of pixels plus 5 bytes padding per row.
        let data = [1, 2, 3, 0, 0, 0, 0, 0, 4, 5, 6, 0, 0, 0, 0, 0];
        assert_eq!(pack_rows(&data, 8, 1, 2), Some(vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn pack_rows_rejects_short_planes() {
        assert_eq!(pack_rows(&[0; 5], 3, 1, 2), None);
        assert_eq!(pack_rows(&[0; 12], 2, 1, 2), None);
    }

    #[test]
    fn corrupt_input_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.heic");
        let output = dir.path().join("broken.jpg");
        fs::write(&input, b"definitely not an image").unwrap();

        let result = HeifJpegCodec.convert(&input, &output);

        assert!(matches!(result, Err(ConvertError::Decode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn failed_encode_leaves_no_output_behind() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("too_wide.jpg");
        // JPEG dimensions are limited to 65535 pixels.
        let image = RgbImage::new(65_536, 1);

        let result = HeifJpegCodec.encode(&image, &output);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn encodes_rgb_buffer_as_jpeg() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.jpg");
        let image = RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 10]));

        HeifJpegCodec.encode(&image, &output).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
