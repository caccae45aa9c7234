/// Chart models: pure state and geometry for each dashboard panel.
///
/// Everything here is plain data so the selection fan-out can be tested
/// without a window; rendering lives in `crate::ui`.
pub mod histogram;
pub mod line_graph;
pub mod map_view;
pub mod scatter;
