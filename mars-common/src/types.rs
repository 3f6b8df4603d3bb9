use serde::{Deserialize, Serialize};

/// Envelope returned by the NASA manifest endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverManifest {
    pub photo_manifest: PhotoManifest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoManifest {
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
    pub max_sol: u32,
    pub max_date: String,
    pub total_photos: u64,
    /// Per-sol entries, ordered by sol
    #[serde(default)]
    pub photos: Vec<ManifestSolEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSolEntry {
    pub sol: u32,
    pub earth_date: String,
    pub total_photos: u64,
    #[serde(default)]
    pub cameras: Vec<String>,
}

impl RoverManifest {
    pub fn max_sol(&self) -> u32 {
        self.photo_manifest.max_sol
    }

    pub fn sol_entry(&self, sol: u32) -> Option<&ManifestSolEntry> {
        self.photo_manifest.photos.iter().find(|entry| entry.sol == sol)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCamera {
    pub id: u64,
    pub name: String,
    pub rover_id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRover {
    pub id: u64,
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
}

/// A single image record from the photos endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: PhotoCamera,
    pub img_src: String,
    pub earth_date: String,
    pub rover: PhotoRover,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotosResponse {
    #[serde(default)]
    pub photos: Vec<RoverPhoto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_JSON: &str = r#"{
        "photo_manifest": {
            "name": "Curiosity",
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active",
            "max_sol": 4102,
            "max_date": "2024-02-19",
            "total_photos": 695670,
            "photos": [
                {"sol": 0, "earth_date": "2012-08-06", "total_photos": 3702, "cameras": ["CHEMCAM", "FHAZ", "MARDI", "RHAZ"]},
                {"sol": 1, "earth_date": "2012-08-07", "total_photos": 16, "cameras": ["MAHLI", "MAST", "NAVCAM"]}
            ]
        }
    }"#;

    #[test]
    fn test_decode_manifest() {
        let manifest: RoverManifest = serde_json::from_str(MANIFEST_JSON).unwrap();
        assert_eq!(manifest.max_sol(), 4102);
        assert_eq!(manifest.photo_manifest.photos.len(), 2);
        assert_eq!(manifest.sol_entry(1).map(|e| e.cameras.len()), Some(3));
        assert!(manifest.sol_entry(2).is_none());
    }

    #[test]
    fn test_missing_photos_field_is_empty() {
        let response: PhotosResponse = serde_json::from_str("{}").unwrap();
        assert!(response.photos.is_empty());
    }

    #[test]
    fn test_decode_photo() {
        let json = r#"{"photos": [{
            "id": 102693,
            "sol": 1000,
            "camera": {"id": 20, "name": "FHAZ", "rover_id": 5, "full_name": "Front Hazard Avoidance Camera"},
            "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/proj/msl/redops/ods/surface/sol/01000/opgs/edr/fcam/FLB_486265257EDR_F0481570FHAZ00323M_.JPG",
            "earth_date": "2015-05-30",
            "rover": {"id": 5, "name": "Curiosity", "landing_date": "2012-08-06", "launch_date": "2011-11-26", "status": "active"}
        }]}"#;
        let response: PhotosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.photos[0].camera.name, "FHAZ");
        assert_eq!(response.photos[0].rover.name, "Curiosity");
    }
}
