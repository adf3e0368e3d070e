use image::{ImageBuffer, RgbaImage};

use crate::error::SteganoError;
use crate::result::Result;

/// Number of samples per pixel, the layout is always R,G,B,A.
pub const CHANNELS: usize = 4;

/// A color channel inside an RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl Channel {
    /// The color channels that carry data, alpha is never touched
    pub const COLORS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline(always)]
    pub fn offset(self) -> usize {
        self as usize
    }
}

/// Flat row-major RGBA8 pixel data.
///
/// The invariant `samples.len() == width * height * 4` holds for every instance. Techniques
/// borrow the buffer mutably while hiding, so a buffer can never be shared between two
/// concurrent hide calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if samples.len() != width as usize * height as usize * CHANNELS {
            return Err(SteganoError::InvalidPixelBuffer {
                width,
                height,
                len: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// builds a buffer by asking `f` for the RGBA value at every `(x, y)`
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut samples = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }

        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// index into the flat sample slice
    #[inline(always)]
    pub fn sample_index(&self, x: u32, y: u32, channel: Channel) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS + channel.offset()
    }

    #[inline(always)]
    pub fn get(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.samples[self.sample_index(x, y, channel)]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: u8) {
        let i = self.sample_index(x, y, channel);
        self.samples[i] = value;
    }

    /// sample of the `n`-th pixel in buffer order
    #[inline(always)]
    pub fn nth(&self, pixel: usize, channel: Channel) -> u8 {
        self.samples[pixel * CHANNELS + channel.offset()]
    }

    #[inline(always)]
    pub fn nth_mut(&mut self, pixel: usize, channel: Channel) -> &mut u8 {
        &mut self.samples[pixel * CHANNELS + channel.offset()]
    }

    /// iterates over one channel of all pixels in buffer order
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = u8> + '_ {
        self.samples
            .chunks_exact(CHANNELS)
            .map(move |pixel| pixel[channel.offset()])
    }

    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height, len) = (self.width, self.height, self.samples.len());
        ImageBuffer::from_raw(width, height, self.samples)
            .ok_or(SteganoError::InvalidPixelBuffer { width, height, len })
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_a_buffer_of_wrong_length() {
        let result = PixelBuffer::new(2, 2, vec![0; 15]);
        match result {
            Err(SteganoError::InvalidPixelBuffer { width, height, len }) => {
                assert_eq!((width, height, len), (2, 2, 15));
            }
            _ => panic!("a 15 sample buffer is not a 2x2 RGBA image"),
        }
    }

    #[test]
    fn should_lay_out_pixels_row_major() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]);

        assert_eq!(buffer.len(), 3 * 2 * 4);
        assert_eq!(buffer.get(2, 1, Channel::Red), 2);
        assert_eq!(buffer.get(2, 1, Channel::Green), 1);
        assert_eq!(buffer.nth(5, Channel::Red), 2);
        assert_eq!(buffer.sample_index(1, 1, Channel::Blue), (3 + 1) * 4 + 2);
    }

    #[test]
    fn should_convert_from_and_into_rgba_image() {
        let image = RgbaImage::from_fn(4, 3, |x, y| image::Rgba([x as u8, y as u8, 1, 2]));
        let buffer = PixelBuffer::from(image.clone());

        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.into_image().unwrap(), image);
    }

    #[test]
    fn should_iterate_a_single_channel() {
        let buffer = PixelBuffer::from_fn(2, 2, |x, y| [0, 0, (x + 2 * y) as u8, 255]);

        assert_eq!(buffer.channel(Channel::Blue).collect::<Vec<_>>(), [0, 1, 2, 3]);
    }
}
