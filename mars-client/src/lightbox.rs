use mars_common::RoverPhoto;

/// Full-size photo viewer over the accumulated photo list.
///
/// Tracks the open photo by id, so appended pages do not shift it.
/// Navigation stops at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    open: Option<u64>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, photo_id: u64) {
        self.open = Some(photo_id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn index(&self, photos: &[RoverPhoto]) -> Option<usize> {
        let id = self.open?;
        photos.iter().position(|p| p.id == id)
    }

    pub fn current<'a>(&self, photos: &'a [RoverPhoto]) -> Option<&'a RoverPhoto> {
        self.index(photos).map(|i| &photos[i])
    }

    /// 1-based position and total, e.g. "3 of 25"
    pub fn position(&self, photos: &[RoverPhoto]) -> Option<(usize, usize)> {
        self.index(photos).map(|i| (i + 1, photos.len()))
    }

    pub fn next<'a>(&mut self, photos: &'a [RoverPhoto]) -> Option<&'a RoverPhoto> {
        let i = self.index(photos)?;
        if i + 1 < photos.len() {
            self.open = Some(photos[i + 1].id);
        }
        self.current(photos)
    }

    pub fn prev<'a>(&mut self, photos: &'a [RoverPhoto]) -> Option<&'a RoverPhoto> {
        let i = self.index(photos)?;
        if i > 0 {
            self.open = Some(photos[i - 1].id);
        }
        self.current(photos)
    }
}
