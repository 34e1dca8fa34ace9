// Opens a camera and hands out RGB frames for the filter.
// Visual expectation: when main.rs calls `next_frame()`, you get the next
// image the webcam sees, as plain RGB8 bytes.

use glaucoma_sim::error::Error;
use glaucoma_sim::types::Frame;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    index: u32,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` at (or near) the requested resolution and start streaming.
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("create camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("open stream on camera {index}: {e}")))?;

        // The stream may settle on a slightly different resolution.
        let actual = cam.resolution();
        Ok(Self { cam, index, width: actual.width(), height: actual.height() })
    }

    /// Try each index in order, keeping the first camera that opens.
    pub fn open_first(indices: &[u32], width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let mut last_err = Error::CameraInit("no camera index to try".into());
        for &index in indices {
            match Self::new(index, width, height, fps) {
                Ok(cam) => return Ok(cam),
                Err(e) => {
                    log::warn!("{e}; trying next camera");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    /// Block until the next frame arrives and decode it to RGB8.
    pub fn next_frame(&mut self) -> Result<Frame, Error> {
        let raw = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;
        let rgb = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode RGB: {e}")))?;
        let (w, h) = rgb.dimensions();
        Frame::new(w as usize, h as usize, rgb.into_raw())
            .map_err(|e| Error::CameraFrame(e.to_string()))
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The resolution the camera is actually delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            log::debug!("stop stream on camera {}: {e}", self.index);
        }
    }
}
