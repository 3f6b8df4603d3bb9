pub mod filters;
pub mod rover;
pub mod types;

pub use filters::{DateSelector, FilterUpdate, PhotoFilters, NASA_PAGE_SIZE};
pub use rover::{
    camera_full_name, rover_by_api_name, rover_info, rover_summaries, CameraInfo, InvalidRoverName,
    RoverInfo, RoverName, RoverStatus, RoverSummary, INVALID_ROVER_MESSAGE, ROVERS,
};
pub use types::{
    ManifestSolEntry, PhotoCamera, PhotoManifest, PhotoRover, PhotosResponse, RoverManifest,
    RoverPhoto,
};
