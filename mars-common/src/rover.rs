use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to callers for any rover name outside the supported set
pub const INVALID_ROVER_MESSAGE: &str = "Invalid rover name. Use: curiosity, opportunity, or spirit";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", INVALID_ROVER_MESSAGE)]
pub struct InvalidRoverName(pub String);

/// Rover identifier accepted by the NASA Mars Rover Photos API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoverName {
    Curiosity,
    Opportunity,
    Spirit,
}

impl RoverName {
    pub const ALL: [RoverName; 3] = [RoverName::Curiosity, RoverName::Opportunity, RoverName::Spirit];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoverName::Curiosity => "curiosity",
            RoverName::Opportunity => "opportunity",
            RoverName::Spirit => "spirit",
        }
    }
}

impl std::fmt::Display for RoverName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoverName {
    type Err = InvalidRoverName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curiosity" => Ok(RoverName::Curiosity),
            "opportunity" => Ok(RoverName::Opportunity),
            "spirit" => Ok(RoverName::Spirit),
            _ => Err(InvalidRoverName(s.to_string())),
        }
    }
}

/// Mission status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoverStatus {
    Active,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    pub name: &'static str,
    pub full_name: &'static str,
}

/// Static catalog entry for one rover
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoverInfo {
    pub name: &'static str,
    pub api_name: RoverName,
    pub landing_site: &'static str,
    /// Degrees, planetocentric
    pub latitude: f64,
    /// Degrees east, 0..360
    pub longitude: f64,
    pub landing_date: &'static str,
    pub status: RoverStatus,
    pub description: &'static str,
    pub cameras: &'static [CameraInfo],
}

/// The subset of [`RoverInfo`] served by `GET /api/rovers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoverSummary {
    pub name: String,
    pub api_name: RoverName,
    pub landing_site: String,
    pub landing_date: String,
    pub status: RoverStatus,
}

impl From<&RoverInfo> for RoverSummary {
    fn from(info: &RoverInfo) -> Self {
        Self {
            name: info.name.to_string(),
            api_name: info.api_name,
            landing_site: info.landing_site.to_string(),
            landing_date: info.landing_date.to_string(),
            status: info.status,
        }
    }
}

const FHAZ: CameraInfo = CameraInfo { name: "FHAZ", full_name: "Front Hazard Avoidance Camera" };
const RHAZ: CameraInfo = CameraInfo { name: "RHAZ", full_name: "Rear Hazard Avoidance Camera" };
const NAVCAM: CameraInfo = CameraInfo { name: "NAVCAM", full_name: "Navigation Camera" };
const PANCAM: CameraInfo = CameraInfo { name: "PANCAM", full_name: "Panoramic Camera" };
const MINITES: CameraInfo = CameraInfo {
    name: "MINITES",
    full_name: "Miniature Thermal Emission Spectrometer",
};

const CURIOSITY_CAMERAS: [CameraInfo; 7] = [
    FHAZ,
    RHAZ,
    CameraInfo { name: "MAST", full_name: "Mast Camera" },
    CameraInfo { name: "CHEMCAM", full_name: "Chemistry and Camera Complex" },
    CameraInfo { name: "MAHLI", full_name: "Mars Hand Lens Imager" },
    CameraInfo { name: "MARDI", full_name: "Mars Descent Imager" },
    NAVCAM,
];

const MER_CAMERAS: [CameraInfo; 5] = [FHAZ, RHAZ, NAVCAM, PANCAM, MINITES];

pub static ROVERS: [RoverInfo; 3] = [
    RoverInfo {
        name: "Curiosity",
        api_name: RoverName::Curiosity,
        landing_site: "Gale Crater",
        latitude: -4.5895,
        longitude: 137.4417,
        landing_date: "2012-08-06",
        status: RoverStatus::Active,
        description: "NASA's Curiosity rover landed on Mars on August 6, 2012, inside Gale Crater. \
            Its mission is to study the climate and geology of Mars, investigate whether the selected \
            field site has ever offered environmental conditions favorable for microbial life, and to \
            study the role of water.",
        cameras: &CURIOSITY_CAMERAS,
    },
    RoverInfo {
        name: "Opportunity",
        api_name: RoverName::Opportunity,
        landing_site: "Meridiani Planum",
        latitude: -1.9462,
        longitude: 354.4734,
        landing_date: "2004-01-25",
        status: RoverStatus::Complete,
        description: "Opportunity landed on Mars on January 25, 2004. Originally designed for a \
            90-day mission, it operated for nearly 15 years, traveling over 28 miles. Contact was \
            lost in June 2018 during a planet-wide dust storm.",
        cameras: &MER_CAMERAS,
    },
    RoverInfo {
        name: "Spirit",
        api_name: RoverName::Spirit,
        landing_site: "Gusev Crater",
        latitude: -14.5684,
        longitude: 175.4726,
        landing_date: "2004-01-04",
        status: RoverStatus::Complete,
        description: "Spirit landed on Mars on January 4, 2004. Like its twin Opportunity, it was \
            designed for a 90-day mission but operated for over 6 years. Spirit became stuck in soft \
            soil in 2009 and its last communication was in March 2010.",
        cameras: &MER_CAMERAS,
    },
];

pub fn rover_info(rover: RoverName) -> &'static RoverInfo {
    match rover {
        RoverName::Curiosity => &ROVERS[0],
        RoverName::Opportunity => &ROVERS[1],
        RoverName::Spirit => &ROVERS[2],
    }
}

/// Look up a catalog entry by API identifier (case-insensitive)
pub fn rover_by_api_name(api_name: &str) -> Option<&'static RoverInfo> {
    api_name.parse::<RoverName>().ok().map(rover_info)
}

/// Full camera name for display, if the rover's catalog knows the camera
pub fn camera_full_name(rover: RoverName, camera: &str) -> Option<&'static str> {
    rover_info(rover)
        .cameras
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(camera))
        .map(|c| c.full_name)
}

pub fn rover_summaries() -> Vec<RoverSummary> {
    ROVERS.iter().map(RoverSummary::from).collect()
}
