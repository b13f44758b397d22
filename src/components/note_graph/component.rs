//! DOM layer of the graph: canvas setup, event wiring, the animation loop
//! and teardown. All graph math lives in the sibling modules; this file
//! only moves data between browser events and `NoteGraphState`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window};

use super::interaction::{self, Cursor};
use super::render;
use super::state::NoteGraphState;
use super::types::Note;

// `HtmlElement::style` is shadowed on the canvas by a blanket extension
// trait from the leptos prelude, so it is called fully qualified here.
fn css_style(canvas: &HtmlCanvasElement) -> web_sys::CssStyleDeclaration {
	web_sys::HtmlElement::style(canvas)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: Cursor) {
	let _ = css_style(canvas).set_property("cursor", cursor.css());
}

fn event_position(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

/// Interactive force-directed graph over a note collection.
///
/// `notes` is a read-only snapshot signal; every change fully regenerates
/// the model (no diffing). Bumping `fit_requests` frames the whole graph.
/// `on_note_open` receives the note id on double-click.
#[component]
pub fn NoteGraphCanvas(
	#[prop(into)] notes: Signal<Vec<Note>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(into, optional)] fit_requests: Option<Signal<u32>>,
	#[prop(into, optional)] on_note_open: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NoteGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_init, animate_init, resize_cb_init, frame_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		frame_id.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		// Backing store in device pixels, graph math in logical pixels.
		let dpr = window.device_pixel_ratio();
		canvas.set_width((w * dpr) as u32);
		canvas.set_height((h * dpr) as u32);
		let _ = css_style(&canvas).set_property("width", &format!("{w}px"));
		let _ = css_style(&canvas).set_property("height", &format!("{h}px"));

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let _ = ctx.scale(dpr, dpr);

		let initial = notes.get_untracked();
		log::info!("note graph initialized: {} notes, {}x{}", initial.len(), w, h);
		*state_init.borrow_mut() = Some(NoteGraphState::new(&initial, w, h, || {
			js_sys::Math::random()
		}));

		if fullscreen {
			let (state_resize, canvas_resize, ctx_resize) =
				(state_init.clone(), canvas.clone(), ctx.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				let dpr = win.device_pixel_ratio();
				canvas_resize.set_width((nw * dpr) as u32);
				canvas_resize.set_height((nh * dpr) as u32);
				let _ = css_style(&canvas_resize).set_property("width", &format!("{nw}px"));
				let _ = css_style(&canvas_resize).set_property("height", &format!("{nh}px"));
				// Resizing the backing store resets the context transform.
				let _ = ctx_resize.scale(dpr, dpr);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, frame_anim) = (
			state_init.clone(),
			animate_init.clone(),
			frame_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if !s.running {
					// Torn down between scheduling and this callback.
					return;
				}
				s.tick();
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					frame_anim.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_init.set(Some(id));
			}
		}
	});

	// refresh(): any change to the note snapshot rebuilds the model in full.
	let state_refresh = state.clone();
	Effect::new(move |prev: Option<()>| {
		let snapshot = notes.get();
		if prev.is_some() {
			if let Some(ref mut s) = *state_refresh.borrow_mut() {
				log::debug!("note graph refresh: {} notes", snapshot.len());
				s.refresh(&snapshot, || js_sys::Math::random());
			}
		}
	});

	if let Some(fit) = fit_requests {
		let state_fit = state.clone();
		Effect::new(move |prev: Option<u32>| {
			let n = fit.get();
			if prev.is_some_and(|p| p != n) {
				if let Some(ref mut s) = *state_fit.borrow_mut() {
					s.zoom_to_fit();
				}
			}
			n
		});
	}

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.interaction.pointer_down(&s.model.nodes, &s.camera, x, y);
			set_cursor(&canvas, s.interaction.cursor());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let NoteGraphState {
				ref mut model,
				ref mut camera,
				ref mut interaction,
				..
			} = *s;
			interaction.pointer_move(&mut model.nodes, camera, x, y);
			set_cursor(&canvas, interaction.cursor());
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.interaction.pointer_up(&s.model.nodes, &s.camera, x, y);
			set_cursor(&canvas, s.interaction.cursor());
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.interaction.pointer_leave();
			set_cursor(&canvas, s.interaction.cursor());
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		let opened = {
			let borrowed = state_dc.borrow();
			let Some(ref s) = *borrowed else {
				return;
			};
			interaction::hit_test(&s.model.nodes, &s.camera, x, y)
				.map(|idx| s.model.nodes[idx].id.clone())
		};
		// Borrow released first: the host callback may feed back into the
		// notes signal and trigger a refresh.
		if let (Some(id), Some(cb)) = (opened, on_note_open) {
			cb.run(id);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let NoteGraphState {
				ref mut camera,
				ref mut interaction,
				..
			} = *s;
			interaction.wheel(camera, x, y, ev.delta_y());
		}
	};

	// Single-touch maps onto the pointer path; multi-touch is not handled.
	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, touch.client_x(), touch.client_y());
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			s.interaction.pointer_down(&s.model.nodes, &s.camera, x, y);
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, touch.client_x(), touch.client_y());
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			let NoteGraphState {
				ref mut model,
				ref mut camera,
				ref mut interaction,
				..
			} = *s;
			interaction.pointer_move(&mut model.nodes, camera, x, y);
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		let Some(touch) = ev.changed_touches().get(0) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, touch.client_x(), touch.client_y());
		if let Some(ref mut s) = *state_te.borrow_mut() {
			s.interaction.pointer_up(&s.model.nodes, &s.camera, x, y);
		}
	};

	// destroy(): stop the loop, cancel the pending frame, detach listeners.
	// `on_cleanup` demands Send + Sync, which the Rc handles are not; the
	// SendWrapper is safe because cleanup runs on the same thread.
	let handles = SendWrapper::new((state, animate, resize_cb, frame_id));
	on_cleanup(move || {
		let (state_cleanup, animate_cleanup, resize_cleanup, frame_cleanup) = handles.take();
		if let Some(ref mut s) = *state_cleanup.borrow_mut() {
			s.running = false;
		}
		if let Some(win) = web_sys::window() {
			if let Some(id) = frame_cleanup.take() {
				let _ = win.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *resize_cleanup.borrow() {
				let _ =
					win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		animate_cleanup.borrow_mut().take();
		resize_cleanup.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="note-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block; cursor: grab; touch-action: none;"
		/>
	}
}
