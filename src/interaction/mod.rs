//! Pointer interaction state machines.
//!
//! Host adapters translate toolkit pointer events into these types; nothing
//! here depends on a UI framework.

mod resize;

pub use resize::{
    DragSession, ResizeBehavior, ResizeCommit, ResizeCommitSink, ResizeEdge, ResizeEffect,
    ResizeEffects, ResizeEvent, ResizeFrame, ResizeGesture, ResizeMode, ResizePreview,
    ResizeState, ResizeTarget, clamp_resize, transition,
};
