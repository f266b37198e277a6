use crate::domain::model::ImageRef;

/// Cyclic cursor over a resolved image set. The cursor always starts at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<ImageRef>,
    cursor: usize,
}

impl Gallery {
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self { images, cursor: 0 }
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.images.get(self.cursor)
    }

    /// Next/previous controls only exist for more than one image.
    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next(&mut self) {
        if !self.has_navigation() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        if !self.has_navigation() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.images.len() - 1
        } else {
            self.cursor - 1
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: usize) -> Gallery {
        Gallery::new((0..n).map(|i| ImageRef::new(format!("img{}", i))).collect())
    }

    #[test]
    fn test_next_wraps_to_start() {
        let mut g = gallery(3);
        g.next();
        g.next();
        assert_eq!(g.cursor(), 2);

        g.next();
        assert_eq!(g.cursor(), 0);
        assert_eq!(g.current(), Some(&ImageRef::from("img0")));
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let mut g = gallery(3);
        g.previous();
        assert_eq!(g.cursor(), 2);

        g.previous();
        assert_eq!(g.cursor(), 1);
    }

    #[test]
    fn test_single_image_has_no_navigation() {
        let mut g = gallery(1);
        assert!(!g.has_navigation());

        g.next();
        g.previous();
        assert_eq!(g.cursor(), 0);
    }

    #[test]
    fn test_empty_gallery_is_inert() {
        let mut g = gallery(0);
        g.next();
        g.previous();
        assert_eq!(g.cursor(), 0);
        assert!(g.current().is_none());
    }
}
