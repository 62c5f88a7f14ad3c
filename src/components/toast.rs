use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// Latest notice plus a sequence number so repeating the same text still
/// restarts the timer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub seq: u32,
    pub message: AttrValue,
}

pub enum ToastAction {
    Show(String),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ToastAction::Show(message) => Rc::new(Self {
                seq: self.seq.wrapping_add(1),
                message: message.into(),
            }),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub state: ToastState,
    pub duration_ms: u32,
}

#[function_component]
pub fn Toast(props: &ToastProps) -> Html {
    let visible = use_state(|| false);
    {
        let visible = visible.clone();
        let ms = props.duration_ms;
        // A newer notice drops the pending timeout and starts its own.
        use_effect_with(props.state.seq, move |seq| {
            let timeout = (*seq > 0).then(|| {
                visible.set(true);
                let visible = visible.clone();
                Timeout::new(ms, move || visible.set(false))
            });
            move || drop(timeout)
        });
    }
    let opacity = if *visible { "1" } else { "0" };
    html! {<div class="toast" style={format!("position:absolute; left:50%; bottom:96px; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:6px 12px; font-size:13px; pointer-events:none; transition:opacity 0.2s; opacity:{opacity};")}>
        { props.state.message.clone() }
    </div>}
}
