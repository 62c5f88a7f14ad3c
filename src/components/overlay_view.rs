use web_sys::Element;
use yew::prelude::*;

use crate::render::OverlayView;
use crate::state::{PointerInput, PointerPhase};

#[derive(Properties, PartialEq, Clone)]
pub struct OverlayImageProps {
    pub view: OverlayView,
    pub src: Option<AttrValue>,
    pub gesturing: bool,
    pub on_pointer: Callback<PointerInput>,
}

/// The translucent overlay image. Raw pointer events are forwarded to the
/// session untouched apart from capture on down.
#[function_component]
pub fn OverlayImage(props: &OverlayImageProps) -> Html {
    let forward = |phase: PointerPhase| {
        let cb = props.on_pointer.clone();
        Callback::from(move |e: PointerEvent| {
            if phase == PointerPhase::Down {
                if let Some(el) = e.target_dyn_into::<Element>() {
                    let _ = el.set_pointer_capture(e.pointer_id());
                }
            }
            e.prevent_default();
            cb.emit(PointerInput::new(
                e.pointer_id(),
                phase,
                e.client_x() as f64,
                e.client_y() as f64,
            ));
        })
    };

    let mut class = props.view.class(props.src.is_some());
    if props.gesturing {
        class.push_str(" is-gesturing");
    }
    html! {
        <img
            id="overlay"
            class={class}
            src={props.src.clone().unwrap_or_default()}
            alt=""
            draggable="false"
            style={format!("position:absolute; left:50%; top:50%; max-width:90vw; touch-action:none; user-select:none; {}", props.view.style())}
            onpointerdown={forward(PointerPhase::Down)}
            onpointermove={forward(PointerPhase::Move)}
            onpointerup={forward(PointerPhase::Up)}
            onpointercancel={forward(PointerPhase::Cancel)}
            onpointerleave={forward(PointerPhase::Leave)}
        />
    }
}
