//! Apply/clear cycle for previewing an annotation.
//!
//! The session keeps the pristine upload next to the current preview. Every
//! `apply` draws onto the pristine image, so applying twice shows only the
//! second annotation. `clear` puts the pristine image back.

use super::{AnnotationDescriptor, AnnotationError, Color, render};
use crate::imaging::RasterImage;

#[derive(Debug, Clone)]
pub struct AnnotationSession {
    original: RasterImage,
    current: RasterImage,
}

impl AnnotationSession {
    pub fn new(original: RasterImage) -> Self {
        Self {
            current: original.clone(),
            original,
        }
    }

    /// Replace the preview with `descriptor` drawn onto the original.
    /// On error the previous preview is kept.
    pub fn apply(
        &mut self,
        descriptor: &AnnotationDescriptor,
        color: Color,
    ) -> Result<&RasterImage, AnnotationError> {
        self.current = render(&self.original, descriptor, color)?;
        Ok(&self.current)
    }

    pub fn clear(&mut self) -> &RasterImage {
        self.current = self.original.clone();
        &self.current
    }

    pub fn current(&self) -> &RasterImage {
        &self.current
    }

    pub fn original(&self) -> &RasterImage {
        &self.original
    }

    pub fn is_annotated(&self) -> bool {
        self.current != self.original
    }

    pub fn into_current(self) -> RasterImage {
        self.current
    }
}
