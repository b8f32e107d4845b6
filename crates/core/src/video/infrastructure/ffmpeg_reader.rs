use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::{ReadError, VideoReader};
use crate::video::infrastructure::decode::StreamDecoder;

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec).
///
/// Converts each decoded frame to RGB24 and wraps it in a [`Frame`].
pub struct FfmpegReader {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    stream: Option<StreamDecoder>,
}

// Safety: FfmpegReader is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegReader {}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            stream: None,
        }
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;
        let stream = StreamDecoder::for_best_stream(&ictx, "No video stream found")?;

        let av_stream = ictx
            .stream(stream.stream_index)
            .ok_or("video stream disappeared")?;
        let rate = av_stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };
        let total_frames = frame_count(av_stream.frames(), ictx.duration(), fps);

        let metadata = VideoMetadata {
            width: stream.width,
            height: stream.height,
            fps,
            total_frames,
            codec: stream
                .decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };
        log::debug!(
            "Opened {}: {}x{} @ {:.2} fps, {} frames",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.total_frames
        );

        self.stream = Some(stream);
        self.input_ctx = Some(ictx);
        Ok(metadata)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
        let (Some(ictx), Some(stream)) = (self.input_ctx.as_mut(), self.stream.as_mut()) else {
            return Box::new(std::iter::once(Err("FfmpegReader: not opened".into())));
        };

        Box::new(FfmpegFrameIter {
            ictx,
            stream,
            frame_index: 0,
            flushing: false,
            done: false,
        })
    }

    fn close(&mut self) {
        self.stream = None;
        self.input_ctx = None;
    }
}

/// Containers that do not record a frame count fall back to
/// `duration * fps`. `duration_us` is in `AV_TIME_BASE` units.
fn frame_count(recorded: i64, duration_us: i64, fps: f64) -> usize {
    if recorded > 0 {
        return recorded as usize;
    }
    if duration_us > 0 && fps > 0.0 {
        return (duration_us as f64 / 1_000_000.0 * fps).floor() as usize;
    }
    0
}

/// Lazy iterator that decodes video frames one at a time.
struct FfmpegFrameIter<'a> {
    ictx: &'a mut ffmpeg_next::format::context::Input,
    stream: &'a mut StreamDecoder,
    frame_index: usize,
    flushing: bool,
    done: bool,
}

impl FfmpegFrameIter<'_> {
    fn receive(&mut self) -> Option<Result<Frame, ReadError>> {
        let result = self.stream.try_receive(self.frame_index)?;
        if result.is_ok() {
            self.frame_index += 1;
        }
        Some(result)
    }
}

impl Iterator for FfmpegFrameIter<'_> {
    type Item = Result<Frame, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(result) = self.receive() {
            return Some(result);
        }

        if self.flushing {
            self.done = true;
            return None;
        }

        loop {
            let Some((packet_stream, packet)) = self.ictx.packets().next() else {
                let _ = self.stream.decoder.send_eof();
                self.flushing = true;
                if let Some(result) = self.receive() {
                    return Some(result);
                }
                self.done = true;
                return None;
            };

            if packet_stream.index() != self.stream.stream_index {
                continue;
            }

            if self.stream.decoder.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(result) = self.receive() {
                return Some(result);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Encode `num_frames` flat grey MPEG-4 frames whose brightness steps by
    /// 40 per frame.
    pub(crate) fn create_test_video(path: &Path, num_frames: usize, width: u32, height: u32) {
        let fps = 25;
        ffmpeg_next::init().unwrap();

        let mut octx = ffmpeg_next::format::output(path).unwrap();
        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4).unwrap();
        let mut ost = octx.add_stream(Some(codec)).unwrap();

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .unwrap();
        encoder_ctx.set_width(width);
        encoder_ctx.set_height(height);
        encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
        encoder_ctx.set_time_base(ffmpeg_next::Rational(1, fps));
        encoder_ctx.set_frame_rate(Some(ffmpeg_next::Rational(fps, 1)));
        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let mut encoder = encoder_ctx
            .open_with(ffmpeg_next::Dictionary::new())
            .unwrap();
        ost.set_parameters(&encoder);
        octx.write_header().unwrap();
        let ost_time_base = octx.stream(0).unwrap().time_base();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::format::Pixel::YUV420P,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .unwrap();

        let write_packets = |encoder: &mut ffmpeg_next::encoder::Video,
                             octx: &mut ffmpeg_next::format::context::Output| {
            let mut encoded = ffmpeg_next::Packet::empty();
            while encoder.receive_packet(&mut encoded).is_ok() {
                encoded.set_stream(0);
                encoded.rescale_ts(ffmpeg_next::Rational(1, fps), ost_time_base);
                encoded.write_interleaved(octx).unwrap();
            }
        };

        for i in 0..num_frames {
            let mut rgb_frame = ffmpeg_next::util::frame::video::Video::new(
                ffmpeg_next::format::Pixel::RGB24,
                width,
                height,
            );
            let stride = rgb_frame.stride(0);
            let value = ((i * 40) % 256) as u8;
            let data = rgb_frame.data_mut(0);
            for row in 0..height as usize {
                for col in 0..(width as usize * 3) {
                    data[row * stride + col] = value;
                }
            }

            let mut yuv_frame = ffmpeg_next::util::frame::video::Video::empty();
            scaler.run(&rgb_frame, &mut yuv_frame).unwrap();
            yuv_frame.set_pts(Some(i as i64));
            encoder.send_frame(&yuv_frame).unwrap();
            write_packets(&mut encoder, &mut octx);
        }

        encoder.send_eof().unwrap();
        write_packets(&mut encoder, &mut octx);
        octx.write_trailer().unwrap();
    }

    fn test_video_path(dir: &Path) -> PathBuf {
        dir.join("test.mp4")
    }

    #[test]
    fn test_open_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video_path(dir.path());
        create_test_video(&path, 5, 160, 120);

        let mut reader = FfmpegReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.width, 160);
        assert_eq!(meta.height, 120);
        assert!(meta.fps > 0.0);
        assert!(!meta.is_still());
        assert_eq!(meta.source_path, Some(path));
    }

    #[test]
    fn test_open_nonexistent_fails() {
        let mut reader = FfmpegReader::new();
        assert!(reader.open(Path::new("/nonexistent/test.mp4")).is_err());
    }

    #[test]
    fn test_frames_yield_sequential_rgb_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video_path(dir.path());
        create_test_video(&path, 5, 160, 120);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();

        let frames: Vec<Frame> = reader.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 5);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index(), i);
            assert_eq!(frame.data().len(), 160 * 120 * 3);
        }
    }

    #[test]
    fn test_frames_without_open_returns_error() {
        let mut reader = FfmpegReader::new();
        assert!(reader.frames().next().unwrap().is_err());
    }

    #[test]
    fn test_frame_count_fallbacks() {
        assert_eq!(frame_count(120, 0, 0.0), 120);
        assert_eq!(frame_count(0, 4_000_000, 25.0), 100);
        assert_eq!(frame_count(0, 0, 25.0), 0);
        assert_eq!(frame_count(-1, 1_000_000, 0.0), 0);
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video_path(dir.path());
        create_test_video(&path, 1, 160, 120);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        reader.close();
        reader.close();
    }
}
