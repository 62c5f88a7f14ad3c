use std::cell::RefCell;
use std::rc::Rc;

use gloo::file::callbacks::FileReader;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlVideoElement;
use yew::prelude::*;

use super::{
    controls_panel::ControlsPanel,
    overlay_view::OverlayImage,
    toast::{Toast, ToastAction, ToastState},
};
use crate::camera::{self, CameraError, CameraTicket};
use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::session::{BrowserSession, ControlInput, Notice};
use crate::state::{GestureMode, PointerInput};

fn alert(msg: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(msg);
    }
}

/// Runs one camera request to completion and hands the result to the session.
/// A request that was overtaken by a newer flip is dropped there.
fn request_camera(
    session: Rc<RefCell<BrowserSession>>,
    ticket: CameraTicket,
    video_ref: NodeRef,
    toast: UseReducerHandle<ToastState>,
    redraw: UseForceUpdateHandle,
) {
    spawn_local(async move {
        let result = camera::acquire(ticket.facing).await;
        let stream = result.as_ref().ok().map(|(stream, _)| stream.clone());
        let outcome = session.borrow_mut().camera_ready(ticket, result);
        match outcome {
            Ok(Some(notice)) => {
                if let (Some(video), Some(stream)) = (video_ref.cast::<HtmlVideoElement>(), stream) {
                    video.set_src_object(Some(&stream));
                }
                toast.dispatch(ToastAction::Show(notice.to_string()));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!(%err, "camera request failed");
                alert(&err.to_string());
            }
        }
        redraw.force_update();
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(|| BrowserSession::new(OverlayConfig::from_document()));
    let redraw = use_force_update();
    let toast = use_reducer(ToastState::default);
    let video_ref = use_node_ref();
    let image_src = use_state(|| None::<AttrValue>);
    let file_reader = use_mut_ref(|| None::<FileReader>);

    // Start the rear camera once; release it on unmount.
    {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let toast = toast.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            if camera::is_supported() {
                let ticket = session.borrow_mut().start_camera();
                request_camera(session.clone(), ticket, video_ref, toast, redraw);
            } else {
                let err = OverlayError::from(CameraError::Unavailable);
                tracing::error!(%err, "no camera api");
                alert(&err.to_string());
            }
            move || session.borrow_mut().stop_camera()
        });
    }

    let on_pointer = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |input: PointerInput| {
            let before = session.borrow().gestures().mode();
            let changed = session.borrow_mut().pointer(input);
            let after = session.borrow().gestures().mode();
            if changed || std::mem::discriminant(&before) != std::mem::discriminant(&after) {
                redraw.force_update();
            }
        })
    };

    let on_control = {
        let session = session.clone();
        let redraw = redraw.clone();
        let toast = toast.clone();
        Callback::from(move |input: ControlInput| {
            let notice = session.borrow_mut().control(input);
            if let Some(notice) = notice {
                toast.dispatch(ToastAction::Show(notice.to_string()));
            }
            redraw.force_update();
        })
    };

    let on_flip_camera = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let toast = toast.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let ticket = session.borrow_mut().flip_camera();
            request_camera(session.clone(), ticket, video_ref.clone(), toast.clone(), redraw.clone());
        })
    };

    let on_file = {
        let session = session.clone();
        let redraw = redraw.clone();
        let toast = toast.clone();
        let image_src = image_src.clone();
        let file_reader = file_reader.clone();
        Callback::from(move |file: web_sys::File| {
            let session = session.clone();
            let redraw = redraw.clone();
            let toast = toast.clone();
            let image_src = image_src.clone();
            let name = file.name();
            let reader = gloo::file::callbacks::read_as_data_url(&file.into(), move |result| {
                match result {
                    Ok(url) => {
                        image_src.set(Some(url.into()));
                        let notice = session.borrow_mut().image_loaded();
                        tracing::info!(%name, "overlay image loaded");
                        toast.dispatch(ToastAction::Show(notice.to_string()));
                    }
                    Err(err) => {
                        let err = OverlayError::ImageLoad(err.to_string());
                        tracing::error!(%err, %name, "overlay image");
                        toast.dispatch(ToastAction::Show(Notice::Error(err.to_string()).to_string()));
                    }
                }
                redraw.force_update();
            });
            // Replacing a pending reader aborts it.
            *file_reader.borrow_mut() = Some(reader);
        })
    };

    let s = session.borrow();
    let view = s.view();
    let t = s.transform();
    let cfg = &s.config;
    let gesturing = s.gestures().mode() != GestureMode::Idle;
    let video_class = if s.camera_live() { "camera is-live" } else { "camera" };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#000; color:#e6edf3;">
            <video id="camera" class={video_class} ref={video_ref.clone()} autoplay=true playsinline=true muted=true
                style="position:absolute; inset:0; width:100%; height:100%; object-fit:cover;" />
            <OverlayImage
                view={view.clone()}
                src={(*image_src).clone()}
                {gesturing}
                on_pointer={on_pointer}
            />
            <ControlsPanel
                opacity={t.opacity()}
                scale={t.scale()}
                rotation={t.rotation()}
                hud={view.hud.clone()}
                locked={view.locked}
                lock_icon={AttrValue::from(view.lock_icon())}
                min_scale={t.bounds().min}
                max_scale={t.bounds().max}
                scale_step={cfg.scale_step}
                rotation_range={cfg.rotation_range}
                {on_control}
                {on_file}
                {on_flip_camera}
            />
            <Toast state={(*toast).clone()} duration_ms={cfg.toast_ms} />
        </div>
    }
}
