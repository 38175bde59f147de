//! Error types for the external collaborators and the engine.
//!
//! The core has no fatal conditions of its own; everything here originates at
//! a collaborator boundary (detector, classifier, image source) and is
//! propagated to the caller unchanged.

/// Failure reported by a [`SymmetryDetector`](crate::detect::SymmetryDetector).
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorError {
    pub message: String,
}

impl DetectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DetectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "detector failed: {}", self.message)
    }
}

impl std::error::Error for DetectorError {}

/// Failure reported by a [`RotationClassifier`](crate::classify::RotationClassifier).
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierError {
    pub message: String,
}

impl ClassifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "classifier failed: {}", self.message)
    }
}

impl std::error::Error for ClassifierError {}

/// Errors that fail the processing of one image.
#[derive(Clone, Debug, PartialEq)]
pub enum SymmetryError {
    Detector(DetectorError),
    Classifier(ClassifierError),
    /// Learned mode was requested but no classifier was attached.
    MissingClassifier,
    /// The image could not be loaded or prepared.
    Image(String),
}

impl std::fmt::Display for SymmetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymmetryError::Detector(err) => write!(f, "{err}"),
            SymmetryError::Classifier(err) => write!(f, "{err}"),
            SymmetryError::MissingClassifier => {
                write!(f, "learned synthesis mode requires a classifier")
            }
            SymmetryError::Image(msg) => write!(f, "image error: {msg}"),
        }
    }
}

impl std::error::Error for SymmetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SymmetryError::Detector(err) => Some(err),
            SymmetryError::Classifier(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DetectorError> for SymmetryError {
    fn from(err: DetectorError) -> Self {
        SymmetryError::Detector(err)
    }
}

impl From<ClassifierError> for SymmetryError {
    fn from(err: ClassifierError) -> Self {
        SymmetryError::Classifier(err)
    }
}
