use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::{ReadError, VideoReader};
use crate::video::infrastructure::decode::StreamDecoder;

/// Adapts a single image file to the [`VideoReader`] interface.
///
/// The image is a one-frame video with `fps=0` and `total_frames=1`, so
/// the comparison pipeline treats stills and videos uniformly. Decoding
/// goes through ffmpeg, which is much faster than the `image` crate for
/// large JPEGs.
pub struct ImageFileReader {
    frame: Option<Frame>,
}

// Safety: ImageFileReader is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for ImageFileReader {}

impl ImageFileReader {
    pub fn new() -> Self {
        Self { frame: None }
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_single_frame(
    ictx: &mut ffmpeg_next::format::context::Input,
    stream: &mut StreamDecoder,
) -> Result<Frame, ReadError> {
    for (packet_stream, packet) in ictx.packets() {
        if packet_stream.index() != stream.stream_index {
            continue;
        }
        stream.decoder.send_packet(&packet)?;
        if let Some(frame) = stream.try_receive(0) {
            return frame;
        }
    }

    // Some formats only emit their single frame on flush
    let _ = stream.decoder.send_eof();
    stream
        .try_receive(0)
        .unwrap_or_else(|| Err("Failed to decode image".into()))
}

impl VideoReader for ImageFileReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;
        let mut stream = StreamDecoder::for_best_stream(&ictx, "No image data found")?;
        let frame = decode_single_frame(&mut ictx, &mut stream)?;

        let metadata = VideoMetadata {
            width: frame.width(),
            height: frame.height(),
            fps: 0.0,
            total_frames: 1,
            codec: String::new(),
            source_path: Some(path.to_path_buf()),
        };
        self.frame = Some(frame);
        Ok(metadata)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
        match self.frame.take() {
            Some(frame) => Box::new(std::iter::once(Ok(frame))),
            None => Box::new(std::iter::once(Err("ImageFileReader: not opened".into()))),
        }
    }

    fn close(&mut self) {
        self.frame = None;
    }
}
