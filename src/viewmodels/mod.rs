pub mod panel_viewmodel;
pub mod scanner_viewmodel;

pub use panel_viewmodel::PanelViewModel;
pub use scanner_viewmodel::ScannerViewModel;
