use super::command::DrawerCommand;
use super::event::OutOfRange;
use super::state::DrawerState;
use crate::config::{EffectiveConfig, WidthBounds};
use crate::position::corner_for_edge;

/// Read-only context for drawer reduction.
pub(super) struct DrawerCtx<'a> {
    pub(super) config: &'a EffectiveConfig,
    pub(super) bounds: WidthBounds,
}

/// Side information produced alongside the state mutation.
#[derive(Debug, Default)]
pub(super) struct Reduction {
    pub(super) out_of_range: Option<OutOfRange>,
    pub(super) reload_frame: bool,
}

/// Reduce a command into state updates.
pub(super) fn reduce(
    state: &mut DrawerState,
    command: DrawerCommand,
    ctx: &DrawerCtx<'_>,
) -> Reduction {
    match command {
        DrawerCommand::Open { frame_src } => {
            open(state, frame_src);
            Reduction::default()
        },
        DrawerCommand::Close => close(state, ctx),
        DrawerCommand::Toggle => {
            if state.is_opened() {
                close(state, ctx)
            } else {
                open(state, None);
                Reduction::default()
            }
        },
        DrawerCommand::Pin => {
            state.set_pinned(true);
            Reduction::default()
        },
        DrawerCommand::Unpin => {
            state.set_pinned(false);
            Reduction::default()
        },
        DrawerCommand::SetPosition(position) => {
            state.set_position(position);
            state.set_toggle_button_position(corner_for_edge(
                ctx.config,
                position,
                state.toggle_button_position(),
            ));
            Reduction::default()
        },
        DrawerCommand::SetWidth(requested) => {
            let (applied, clamped) = ctx.bounds.clamp(requested);
            state.set_width_px(applied);
            let out_of_range = clamped.then(|| {
                log::debug!(
                    "drawer width {requested} outside [{}, {}], using \
                     {applied}",
                    ctx.bounds.min,
                    ctx.bounds.max
                );
                OutOfRange { requested, applied }
            });
            Reduction {
                out_of_range,
                reload_frame: false,
            }
        },
        DrawerCommand::SetToggleButtonPosition(corner) => {
            let edge = state.position();
            let corner = if ctx.config.toggle_button_follows_drawer_position()
                && corner.edge() != edge
            {
                log::debug!(
                    "toggle button follows the drawer, snapping {corner} to \
                     {edge}"
                );
                corner.on_edge(edge)
            } else {
                corner
            };
            state.set_toggle_button_position(corner);
            Reduction::default()
        },
        DrawerCommand::OutsideClick => {
            if should_close_on_outside_click(state, ctx.config) {
                close(state, ctx)
            } else {
                Reduction::default()
            }
        },
    }
}

/// Whether an outside click closes the drawer right now.
pub(super) fn should_close_on_outside_click(
    state: &DrawerState,
    config: &EffectiveConfig,
) -> bool {
    state.is_opened() && !state.is_pinned() && config.close_on_outside_click()
}

fn open(state: &mut DrawerState, frame_src: Option<String>) {
    state.set_opened(true);
    if let Some(src) = frame_src {
        state.set_frame_src(Some(src));
    }
}

fn close(state: &mut DrawerState, ctx: &DrawerCtx<'_>) -> Reduction {
    if !state.is_opened() {
        return Reduction::default();
    }

    state.set_opened(false);
    if ctx.config.refresh_frame_on_close() {
        state.set_frame_src(ctx.config.default_src().map(String::from));
        return Reduction {
            out_of_range: None,
            reload_frame: true,
        };
    }
    Reduction::default()
}
