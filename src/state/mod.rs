// ============================================================================
// STATE MODULE - State management with Rc<RefCell> + notifications
// ============================================================================

pub mod app_state;

pub use app_state::*;
