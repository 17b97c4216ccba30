//! Speech synthesis backends

// espeak-ng subprocess rendering to WAV
pub mod espeak;

// flite fallback for systems without espeak-ng
pub mod flite;
