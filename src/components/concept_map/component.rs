use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ConceptMapState;
use super::viewport::{BUTTON_ZOOM_STEP, WHEEL_ZOOM_STEP};
use crate::types::ConceptNode;

type SharedState = Rc<RefCell<Option<ConceptMapState>>>;
type SharedCtx = Rc<RefCell<Option<CanvasRenderingContext2d>>>;

fn repaint(state: &SharedState, ctx: &SharedCtx) {
	if let (Some(s), Some(ctx)) = (state.borrow().as_ref(), ctx.borrow().as_ref()) {
		render::render(s, ctx);
	}
}

fn sync_indicators(state: &SharedState, zoom: RwSignal<f64>, visible: RwSignal<usize>) {
	if let Some(s) = state.borrow().as_ref() {
		zoom.set(s.viewport.zoom);
		visible.set(s.visible_count());
	}
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Interactive concept-map canvas. Click a card to toggle its children,
/// drag the background to pan, scroll to zoom. A new tree value resets
/// expansion and viewport to their defaults.
#[component]
pub fn ConceptMapCanvas(
	#[prop(into)] tree: Signal<ConceptNode>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let ctx: SharedCtx = Rc::new(RefCell::new(None));
	// Card the pointer went down on; toggles only if released on it too.
	let pressed: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

	let zoom_level = RwSignal::new(0.8);
	let visible_nodes = RwSignal::new(0usize);
	let total_nodes = RwSignal::new(0usize);

	let (state_init, ctx_init) = (state.clone(), ctx.clone());
	Effect::new(move |_| {
		let data = tree.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(1200.0)
		});
		let h = height.unwrap_or(700.0);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let context: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*ctx_init.borrow_mut() = Some(context);

		match ConceptMapState::new(&data, w, h) {
			Ok(s) => {
				total_nodes.set(s.total_count());
				*state_init.borrow_mut() = Some(s);
			}
			// A malformed bundle keeps whatever was on screen before.
			Err(err) => warn!("discarding malformed concept tree: {err}"),
		}
		sync_indicators(&state_init, zoom_level, visible_nodes);
		repaint(&state_init, &ctx_init);
	});

	let (state_md, pressed_md) = (state.clone(), pressed.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_position(canvas_ref, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			match s.node_at(x, y) {
				Some(id) => *pressed_md.borrow_mut() = Some(id),
				None => s.viewport.begin_drag(x, y),
			}
		}
	};

	let (state_mm, ctx_mm) = (state.clone(), ctx.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_position(canvas_ref, &ev);
		let dragging = {
			let mut guard = state_mm.borrow_mut();
			match *guard {
				Some(ref mut s) if s.viewport.is_dragging() => {
					s.viewport.continue_drag(x, y);
					true
				}
				_ => false,
			}
		};
		if dragging {
			repaint(&state_mm, &ctx_mm);
		}
	};

	let (state_mu, ctx_mu, pressed_mu) = (state.clone(), ctx.clone(), pressed.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = pointer_position(canvas_ref, &ev);
		{
			let mut guard = state_mu.borrow_mut();
			if let Some(ref mut s) = *guard {
				if let Some(id) = pressed_mu.borrow_mut().take() {
					if s.node_at(x, y).as_deref() == Some(id.as_str()) {
						s.toggle(&id);
					}
				}
				s.viewport.end_drag();
			}
		}
		sync_indicators(&state_mu, zoom_level, visible_nodes);
		repaint(&state_mu, &ctx_mu);
	};

	let (state_ml, pressed_ml) = (state.clone(), pressed.clone());
	let on_mouseleave = move |_: MouseEvent| {
		pressed_ml.borrow_mut().take();
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.viewport.end_drag();
		}
	};

	let (state_wh, ctx_wh) = (state.clone(), ctx.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		{
			let mut guard = state_wh.borrow_mut();
			if let Some(ref mut s) = *guard {
				let delta = if ev.delta_y() > 0.0 {
					-WHEEL_ZOOM_STEP
				} else {
					WHEEL_ZOOM_STEP
				};
				s.viewport.zoom_by(delta);
			}
		}
		sync_indicators(&state_wh, zoom_level, visible_nodes);
		repaint(&state_wh, &ctx_wh);
	};

	let zoom_button = |step: f64, state: SharedState, ctx: SharedCtx| {
		move |_: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				s.viewport.zoom_by(step);
			}
			sync_indicators(&state, zoom_level, visible_nodes);
			repaint(&state, &ctx);
		}
	};
	let on_zoom_in = zoom_button(BUTTON_ZOOM_STEP, state.clone(), ctx.clone());
	let on_zoom_out = zoom_button(-BUTTON_ZOOM_STEP, state.clone(), ctx.clone());

	let (state_rv, ctx_rv) = (state.clone(), ctx.clone());
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rv.borrow_mut() {
			s.viewport.reset();
		}
		sync_indicators(&state_rv, zoom_level, visible_nodes);
		repaint(&state_rv, &ctx_rv);
	};

	let (state_ea, ctx_ea) = (state.clone(), ctx.clone());
	let on_expand_all = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ea.borrow_mut() {
			s.expand_all();
		}
		sync_indicators(&state_ea, zoom_level, visible_nodes);
		repaint(&state_ea, &ctx_ea);
	};

	let (state_ca, ctx_ca) = (state.clone(), ctx.clone());
	let on_collapse_all = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ca.borrow_mut() {
			s.collapse_all();
		}
		sync_indicators(&state_ca, zoom_level, visible_nodes);
		repaint(&state_ca, &ctx_ca);
	};

	view! {
		<div class="concept-map">
			<canvas
				node_ref=canvas_ref
				class="concept-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>
			<div class="map-toolbar">
				<button on:click=on_zoom_in title="Zoom In">"+"</button>
				<button on:click=on_zoom_out title="Zoom Out">"\u{2212}"</button>
				<button on:click=on_reset title="Reset View">"\u{2922}"</button>
				<button on:click=on_expand_all class="wide">"Expand All"</button>
				<button on:click=on_collapse_all class="wide">"Collapse"</button>
			</div>
			<div class="map-badge map-zoom">
				{move || format!("{:.0}%", zoom_level.get() * 100.0)}
			</div>
			<div class="map-badge map-count">
				{move || format!("{} / {} nodes visible", visible_nodes.get(), total_nodes.get())}
			</div>
		</div>
	}
}
