use crate::shared::frame::Frame;
use crate::video::domain::video_reader::ReadError;

/// Copies pixel data from an ffmpeg RGB24 frame into a tightly packed buffer.
///
/// ffmpeg frames may pad each row (stride > width * 3); the padding is dropped.
pub(crate) fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}

/// Decoder state for the best video stream of an opened input.
pub(crate) struct StreamDecoder {
    pub decoder: ffmpeg_next::decoder::Video,
    pub scaler: ffmpeg_next::software::scaling::Context,
    pub width: u32,
    pub height: u32,
    pub stream_index: usize,
}

impl StreamDecoder {
    pub fn for_best_stream(
        ictx: &ffmpeg_next::format::context::Input,
        missing: &'static str,
    ) -> Result<Self, ReadError> {
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(missing)?;
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;
        let width = decoder.width();
        let height = decoder.height();
        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;
        Ok(Self {
            decoder,
            scaler,
            width,
            height,
            stream_index: stream.index(),
        })
    }

    /// Pull one decoded frame if the decoder has one ready.
    pub fn try_receive(&mut self, index: usize) -> Option<Result<Frame, ReadError>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }
        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = self.scaler.run(&decoded, &mut rgb_frame) {
            return Some(Err(Box::new(e)));
        }
        let pixels = extract_rgb_pixels(&rgb_frame, self.width, self.height);
        Some(Ok(Frame::new(pixels, self.width, self.height, index)))
    }
}
