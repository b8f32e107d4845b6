/// A decoded still or video frame: tightly packed RGB24 bytes, row-major.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

/// Square region of a frame, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareRegion {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl Frame {
    pub const CHANNELS: usize = 3;

    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * Self::CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Position of this frame in its source's decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB value at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = ((y as usize) * (self.width as usize) + x as usize) * Self::CHANNELS;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Largest square centred in the frame.
    pub fn center_square(&self) -> SquareRegion {
        let side = self.width.min(self.height);
        SquareRegion {
            x: (self.width - side) / 2,
            y: (self.height - side) / 2,
            side,
        }
    }
}
