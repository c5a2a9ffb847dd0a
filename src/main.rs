#![windows_subsystem = "windows"]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use arboard::Clipboard;
use druid::menu::MenuEventCtx;
use druid::{
    Affine, AppLauncher, BoxConstraints, Color, Data, Env, Event, EventCtx, KbKey, LayoutCtx,
    LifeCycle, LifeCycleCtx, Menu, MenuItem, MouseButton, PaintCtx, RenderContext, Size,
    UpdateCtx, Vec2, Widget, WindowDesc,
};
use rfd::MessageDialog;
use tracing::{info, warn};

use seat_lasso::{
    LassoSelector, Point as MapPoint, PointerButton, PointerDown, Rect as MapRect, SeatLayout,
    SeatMapConfig, SeatRegistry, SeatSelection,
};

#[derive(Clone, Data)]
struct AppState {
    seats: Arc<SeatRegistry>,
    #[data(same_fn = "PartialEq::eq")]
    selection: SeatSelection,
    /// View offset applied to the whole seat map while panning.
    pan: Vec2,
}

fn to_map(pos: druid::Point, pan: Vec2) -> MapPoint {
    let p = pos - pan;
    MapPoint::new(p.x, p.y)
}

fn to_druid(rect: MapRect) -> druid::Rect {
    druid::Rect::new(rect.left, rect.top, rect.right(), rect.bottom())
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

// Clipboard helpers
fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

fn save_selection(path: &Path, selection: &SeatSelection) -> Result<()> {
    let mut body = selection.to_vec().join("\n");
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}

fn show_message(title: &str, description: &str) {
    MessageDialog::new().set_title(title).set_description(description).show();
}

/// Pointer and keyboard state of the seat map, kept apart from druid's contexts.
#[derive(Default)]
struct MapInteraction {
    lasso: LassoSelector,
    /// Last pointer position while a pan drag is in progress.
    pan_anchor: Option<druid::Point>,
    /// Focus was lost while the widget held the pointer; release it on the next mouse up.
    stale_active: bool,
}

impl MapInteraction {
    fn escape(&mut self) {
        self.lasso.cancel();
        self.pan_anchor = None;
    }

    fn focus_lost(&mut self) {
        if self.lasso.is_dragging() || self.pan_anchor.is_some() {
            self.stale_active = true;
        }
        self.lasso.cancel();
        self.lasso.set_alternate_mode(false);
        self.pan_anchor = None;
    }

    /// Offset to add to the view while panning.
    fn pan_to(&mut self, pos: druid::Point) -> Option<Vec2> {
        let anchor = self.pan_anchor?;
        self.pan_anchor = Some(pos);
        Some(pos - anchor)
    }

    /// Primary button released. Returns whether pointer capture should be released.
    fn mouse_up(&mut self, selection: &mut SeatSelection) -> bool {
        let stale = std::mem::take(&mut self.stale_active);
        if self.pan_anchor.take().is_some() {
            return true;
        }
        if self.lasso.is_dragging() {
            self.lasso.end(selection);
            return true;
        }
        stale
    }
}

// Widget implementation
struct SeatMapWidget {
    interaction: MapInteraction,
    extent: Size,
}

impl SeatMapWidget {
    fn new(extent: Size) -> Self {
        SeatMapWidget { interaction: MapInteraction::default(), extent }
    }
}

impl Widget<AppState> for SeatMapWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        let state = &mut self.interaction;
        match event {
            Event::MouseDown(e) => {
                ctx.request_focus();
                if e.button.is_right() {
                    ctx.show_context_menu(make_context_menu(), e.pos);
                    return;
                }

                let pos = to_map(e.pos, data.pan);
                let down = PointerDown {
                    position: pos,
                    button: pointer_button(e.button),
                    target: data.seats.hit_test(pos).map(str::to_string),
                };

                if e.button.is_left() && state.lasso.alternate_mode() {
                    state.pan_anchor = Some(e.pos);
                    ctx.set_active(true);
                } else if state.lasso.begin(&down) {
                    ctx.set_active(true);
                } else if let (Some(id), true) = (&down.target, e.button.is_left()) {
                    // direct click on a seat
                    data.selection.toggle(id);
                }
                ctx.request_paint();
            }

            Event::MouseMove(e) => {
                if let Some(delta) = state.pan_to(e.pos) {
                    data.pan += delta;
                } else if state.lasso.is_dragging() {
                    state.lasso.update(to_map(e.pos, data.pan), data.seats.as_ref());
                    ctx.request_paint();
                }
            }

            Event::MouseUp(e) if e.button.is_left() => {
                if state.mouse_up(&mut data.selection) {
                    ctx.set_active(false);
                    ctx.request_paint();
                }
            }

            Event::KeyDown(k) => match &k.key {
                KbKey::Character(c) if c == " " => {
                    state.lasso.set_alternate_mode(true);
                    ctx.set_handled();
                }
                KbKey::Escape => {
                    state.escape();
                    ctx.set_active(false);
                    ctx.request_paint();
                    ctx.set_handled();
                }
                _ => {}
            },

            Event::KeyUp(k) => {
                if let KbKey::Character(c) = &k.key {
                    if c == " " {
                        state.lasso.set_alternate_mode(false);
                        ctx.set_handled();
                    }
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
        match event {
            LifeCycle::WidgetAdded => ctx.register_for_focus(),
            LifeCycle::FocusChanged(false) => {
                // losing focus mid-drag aborts the lasso
                self.interaction.focus_lost();
                ctx.request_paint();
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old: &AppState, data: &AppState, _env: &Env) {
        if !old.same(data) {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        bc.constrain(self.extent)
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        let full_rect = ctx.size().to_rect();
        ctx.fill(full_rect, &Color::rgb8(0x1e, 0x1f, 0x24));

        let free = Color::rgb8(0x5a, 0x60, 0x6b);
        let selected = Color::rgb8(0x2f, 0x9e, 0x6a);
        let hovered = Color::rgb8(0xe0, 0xb0, 0x3a);
        let lasso = &self.interaction.lasso;

        ctx.with_save(|ctx| {
            ctx.transform(Affine::translate(data.pan));

            for (id, rect) in data.seats.iter() {
                let fill = if lasso.is_hovered(id) {
                    &hovered
                } else if data.selection.contains(id) {
                    &selected
                } else {
                    &free
                };
                let r = to_druid(rect).to_rounded_rect(4.0);
                ctx.fill(r, fill);
            }

            if let Some(g) = lasso.gesture_bounds().filter(|g| !g.is_degenerate()) {
                let r = to_druid(g.to_rect());
                ctx.fill(r, &Color::rgba8(0x4a, 0x90, 0xe2, 0x40));
                ctx.stroke(r, &Color::rgba8(0x4a, 0x90, 0xe2, 0xc0), 1.0);
            }
        });
    }
}

fn make_context_menu() -> Menu<AppState> {
    Menu::empty()
        .entry(MenuItem::new("复制座位号").on_activate(|_ctx: &mut MenuEventCtx, data: &mut AppState, _| {
            if data.selection.is_empty() {
                show_message("提示", "未选择座位");
                return;
            }
            let text = data.selection.to_vec().join(", ");
            match copy_text_to_clipboard(&text) {
                Ok(()) => info!(count = data.selection.len(), "copied seat ids"),
                Err(e) => {
                    warn!(error = %e, "clipboard write failed");
                    show_message("错误", &format!("复制失败: {}", e));
                }
            }
        }))
        .entry(MenuItem::new("另存为...").on_activate(|_ctx, data: &mut AppState, _| {
            if data.selection.is_empty() {
                show_message("提示", "未选择座位");
                return;
            }
            if let Some(path) = rfd::FileDialog::new().add_filter("Text", &["txt"]).save_file() {
                match save_selection(&path, &data.selection) {
                    Ok(()) => info!(path = %path.display(), "saved seat selection"),
                    Err(e) => {
                        warn!(error = %e, "saving selection failed");
                        show_message("错误", &format!("保存失败: {}", e));
                    }
                }
            }
        }))
        .entry(MenuItem::new("清空选择").on_activate(|_ctx, data: &mut AppState, _| data.selection.clear()))
        .entry(MenuItem::new("退出").on_activate(|ctx, _, _| ctx.submit_command(druid::commands::QUIT_APP)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SeatMapConfig::load_or_default(config_path.as_deref())?;
    let seats = SeatLayout::build(&config);
    let (w, h) = SeatLayout::extent(&config);
    info!(seats = seats.len(), "seat map ready");

    let init = AppState { seats: Arc::new(seats), selection: SeatSelection::new(), pan: Vec2::ZERO };
    let window = WindowDesc::new(SeatMapWidget::new(Size::new(w, h)))
        .title("Seat map")
        .window_size((w, h));
    AppLauncher::with_window(window).launch(init)?;
    Ok(())
}
