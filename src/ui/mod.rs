/// Panel renderers. One module per chart panel plus the shared chrome in
/// `panels`; all chart state lives in `crate::charts`, these only draw it.
pub mod histogram_panel;
pub mod line_panel;
pub mod map_panel;
pub mod panels;
pub mod scatter_panel;

use eframe::egui::{Align2, Area, Color32, Context, Frame, Id, Order, Pos2, Ui};

// ---------------------------------------------------------------------------
// Shared hover popup
// ---------------------------------------------------------------------------

/// Hover pick distance in screen pixels.
pub(crate) const PICK_RADIUS: f32 = 8.0;

/// Floating label pinned above a plot point, drawn over every panel.
///
/// `fill` overrides the popup background so the map can tint it with the
/// marker's magnitude color.
pub(crate) fn hover_popup(
    ctx: &Context,
    id: Id,
    pos: Pos2,
    fill: Option<Color32>,
    add_contents: impl FnOnce(&mut Ui),
) {
    Area::new(id)
        .order(Order::Tooltip)
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(pos)
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            let mut frame = Frame::popup(&ctx.style());
            if let Some(color) = fill {
                frame = frame.fill(color);
            }
            frame.show(ui, add_contents);
        });
}
