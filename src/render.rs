//! Rendering output for counters.

/// CSS class carried by the rendered value span.
pub const COUNTER_CLASS: &str = "counter-number";

/// Event name that forces a counter to run regardless of visibility.
pub const RUN_EVENT: &str = "run-counter";

/// What a counter should display right now.
///
/// This is a platform-agnostic representation of the rendered element:
/// `prefix` and `suffix` surround an inner region showing `value`, with the
/// numeric target (`number`) and the current `step` exposed as state
/// readable by external code. The DOM driver renders the inner region as a
/// `<span class="counter-number" number=".." step="..">` element; any other
/// backend can interpret the same data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOutput {
    /// Text before the animated value
    pub prefix: String,
    /// The value currently displayed
    pub value: i64,
    /// The full numeric target from the original text
    pub number: String,
    /// Current step index
    pub step: u32,
    /// Text after the animated value
    pub suffix: String,
}

impl RenderOutput {
    /// Flatten to plain text: `prefix + value + suffix`.
    pub fn to_text(&self) -> String {
        format!("{}{}{}", self.prefix, self.value, self.suffix)
    }
}

/// Web-specific rendering and event wiring.
#[cfg(feature = "web")]
pub mod web {
    use super::{RenderOutput, COUNTER_CLASS, RUN_EVENT};
    use crate::config::CounterConfig;
    use crate::counter::Counter;
    use crate::scroll::DEBOUNCE_DELAY;
    use crate::visibility::{is_in_view, Bounds, Viewport};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Window};

    type TimerClosure = Closure<dyn FnMut()>;

    fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window available".to_string())
    }

    fn document() -> Result<Document, String> {
        window()?
            .document()
            .ok_or_else(|| "No document available".to_string())
    }

    /// The currently visible slice of the document.
    pub fn viewport() -> Result<Viewport, String> {
        let window = window()?;
        let top = window
            .scroll_y()
            .map_err(|_| "Failed to read scroll offset")?;
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .ok_or("Failed to read window height")?;
        Ok(Viewport::with_height(top, height))
    }

    /// An element's vertical extent in document coordinates.
    pub fn element_bounds(element: &Element) -> Result<Bounds, String> {
        let window = window()?;
        let scroll_top = window
            .scroll_y()
            .map_err(|_| "Failed to read scroll offset")?;
        let rect = element.get_bounding_client_rect();
        Ok(Bounds::with_height(rect.top() + scroll_top, rect.height()))
    }

    /// Build the counter's inner elements inside `element`.
    ///
    /// Replaces the element's content with a prefix text node, the value
    /// span (class `counter-number`, carrying `number` and `step`
    /// attributes) and a suffix text node. The counter must already be set
    /// up. Returns the value span.
    pub fn mount(element: &Element, counter: &Counter) -> Result<Element, String> {
        let output = counter.render();
        let document = document()?;
        let span = document
            .create_element("span")
            .map_err(|_| "Failed to create counter span")?;
        span.set_class_name(COUNTER_CLASS);
        apply(&span, &output)?;

        element.set_text_content(None);
        let prefix = document.create_text_node(&output.prefix);
        let suffix = document.create_text_node(&output.suffix);
        element
            .append_child(&prefix)
            .map_err(|_| "Failed to append prefix")?;
        element
            .append_child(&span)
            .map_err(|_| "Failed to append counter span")?;
        element
            .append_child(&suffix)
            .map_err(|_| "Failed to append suffix")?;
        Ok(span)
    }

    /// Write a render output into the value span.
    pub fn apply(span: &Element, output: &RenderOutput) -> Result<(), String> {
        span.set_attribute("number", &output.number)
            .map_err(|_| "Failed to set number attribute")?;
        span.set_attribute("step", &output.step.to_string())
            .map_err(|_| "Failed to set step attribute")?;
        span.set_text_content(Some(&output.value.to_string()));
        Ok(())
    }

    /// Drives one counter's step chain on the browser timer queue.
    ///
    /// Only one timeout is ever pending per loop: starting or resetting
    /// clears the previous handle first, so reset followed by run cannot
    /// leave two chains advancing the same counter.
    struct StepLoop {
        counter: Rc<RefCell<Counter>>,
        target: Element,
        span: Element,
        callback: RefCell<Option<TimerClosure>>,
        pending: Cell<Option<i32>>,
    }

    impl StepLoop {
        fn create(counter: Rc<RefCell<Counter>>, target: Element, span: Element) -> Rc<Self> {
            let step_loop = Rc::new(Self {
                counter,
                target,
                span,
                callback: RefCell::new(None),
                pending: Cell::new(None),
            });
            // The callback holds its own loop, keeping both alive while the
            // owning handle does
            let inner = step_loop.clone();
            let callback = Closure::wrap(Box::new(move || {
                inner.pending.set(None);
                if inner.advance() {
                    inner.schedule();
                }
            }) as Box<dyn FnMut()>);
            *step_loop.callback.borrow_mut() = Some(callback);
            step_loop
        }

        /// Take one step and render it. Returns true when another step
        /// should be scheduled.
        fn advance(&self) -> bool {
            let result = self.counter.borrow_mut().tick();
            match result {
                Some(result) => {
                    let output = self.counter.borrow().render();
                    let _ = apply(&self.span, &output);
                    !result.finished
                }
                None => false,
            }
        }

        fn schedule(&self) {
            self.clear_pending();
            let frame_ms = self.counter.borrow().config().frame_length_ms as i32;
            let Ok(window) = window() else { return };
            let callback = self.callback.borrow();
            let Some(callback) = callback.as_ref() else {
                return;
            };
            if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                frame_ms,
            ) {
                self.pending.set(Some(handle));
            }
        }

        fn clear_pending(&self) {
            if let Some(handle) = self.pending.take() {
                if let Ok(window) = window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
        }

        /// Begin counting: the first step runs synchronously, the rest on
        /// the frame timer. No-op when the counter is already running or
        /// completed.
        fn start(&self) {
            if !self.counter.borrow_mut().run() {
                return;
            }
            self.clear_pending();
            if self.advance() {
                self.schedule();
            }
        }

        /// Cancel any pending step and rewind the counter to zero.
        fn reset(&self) {
            self.clear_pending();
            self.counter.borrow_mut().reset();
            let output = self.counter.borrow().render();
            let _ = apply(&self.span, &output);
        }

        fn visibility_check(&self, viewport: Viewport) {
            if self.counter.borrow().is_running() {
                return;
            }
            let auto_run = self.counter.borrow().config().auto_run;
            let visible = element_bounds(&self.target)
                .map(|bounds| is_in_view(bounds, viewport, true))
                .unwrap_or(false);
            if auto_run && visible {
                self.start();
            } else {
                self.reset();
            }
        }
    }

    /// One debounced visibility pass shared by every counter of an
    /// `attach` call.
    struct ScrollPass {
        loops: Vec<Rc<StepLoop>>,
        pending: Cell<Option<i32>>,
        check: RefCell<Option<TimerClosure>>,
    }

    impl ScrollPass {
        fn create(loops: Vec<Rc<StepLoop>>) -> Rc<Self> {
            let pass = Rc::new(Self {
                loops,
                pending: Cell::new(None),
                check: RefCell::new(None),
            });
            let inner = pass.clone();
            let check = Closure::wrap(Box::new(move || {
                inner.pending.set(None);
                inner.run();
            }) as Box<dyn FnMut()>);
            *pass.check.borrow_mut() = Some(check);
            pass
        }

        fn run(&self) {
            let Ok(viewport) = viewport() else { return };
            for step_loop in &self.loops {
                step_loop.visibility_check(viewport);
            }
        }

        /// Cancel and re-arm the single pending visibility check.
        fn on_scroll(&self) {
            let Ok(window) = window() else { return };
            if let Some(handle) = self.pending.take() {
                window.clear_timeout_with_handle(handle);
            }
            let check = self.check.borrow();
            let Some(check) = check.as_ref() else { return };
            if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                check.as_ref().unchecked_ref(),
                DEBOUNCE_DELAY.as_millis() as i32,
            ) {
                self.pending.set(Some(handle));
            }
        }
    }

    /// Owner of the DOM wiring created by [`attach`].
    ///
    /// Holds the counters, their step loops and every event closure; keep
    /// it alive for as long as the counters should animate.
    pub struct AttachHandle {
        loops: Vec<Rc<StepLoop>>,
        pass: Rc<ScrollPass>,
        _scroll: TimerClosure,
        _triggers: Vec<TimerClosure>,
    }

    impl AttachHandle {
        /// The counters created by this attach call.
        pub fn counters(&self) -> Vec<Rc<RefCell<Counter>>> {
            self.loops.iter().map(|l| l.counter.clone()).collect()
        }

        /// Number of mounted counters.
        pub fn len(&self) -> usize {
            self.loops.len()
        }

        /// Whether any counters were mounted.
        pub fn is_empty(&self) -> bool {
            self.loops.is_empty()
        }

        /// Re-run the visibility pass immediately, bypassing the debounce.
        pub fn refresh(&self) {
            self.pass.run();
        }
    }

    /// Set up counters under `root` and wire scroll-triggered animation.
    ///
    /// Resolves target elements from `config.target` (a selector under
    /// `root`, or `root` itself when `None`), decomposes each element's
    /// text, mounts the value span, binds the `run-counter` trigger event
    /// on each span and a single debounced window scroll listener, then
    /// runs one synchronous visibility pass so counters already in view
    /// start immediately.
    ///
    /// Fails on a bad configuration or when the DOM is unavailable; a
    /// failure here never leaves a timer armed.
    pub fn attach(root: &Element, config: CounterConfig) -> Result<AttachHandle, String> {
        let targets: Vec<Element> = match &config.target {
            Some(selector) => {
                let list = root
                    .query_selector_all(selector)
                    .map_err(|_| format!("Invalid target selector: {:?}", selector))?;
                let mut targets = Vec::with_capacity(list.length() as usize);
                for i in 0..list.length() {
                    if let Some(node) = list.get(i) {
                        if let Ok(element) = node.dyn_into::<Element>() {
                            targets.push(element);
                        }
                    }
                }
                targets
            }
            None => vec![root.clone()],
        };

        let mut loops = Vec::with_capacity(targets.len());
        let mut triggers = Vec::with_capacity(targets.len());
        for target in targets {
            let text = target.text_content().unwrap_or_default();
            let mut counter = Counter::new(config.clone());
            counter.setup(&text).map_err(|e| e.to_string())?;
            let span = mount(&target, &counter)?;

            let step_loop = StepLoop::create(Rc::new(RefCell::new(counter)), target, span.clone());

            // The trigger event forces the chain regardless of visibility
            let trigger_loop = step_loop.clone();
            let trigger = Closure::wrap(Box::new(move || trigger_loop.start()) as Box<dyn FnMut()>);
            span.add_event_listener_with_callback(RUN_EVENT, trigger.as_ref().unchecked_ref())
                .map_err(|_| "Failed to bind run event")?;
            triggers.push(trigger);
            loops.push(step_loop);
        }

        let pass = ScrollPass::create(loops.clone());
        let scroll_pass = pass.clone();
        let scroll = Closure::wrap(Box::new(move || scroll_pass.on_scroll()) as Box<dyn FnMut()>);
        window()?
            .add_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref())
            .map_err(|_| "Failed to bind scroll listener")?;

        // Above-the-fold counters start without waiting for a scroll
        pass.run();

        Ok(AttachHandle {
            loops,
            pass,
            _scroll: scroll,
            _triggers: triggers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let output = RenderOutput {
            prefix: "Users: ".into(),
            value: 50,
            number: "100".into(),
            step: 2,
            suffix: "+".into(),
        };
        assert_eq!(output.to_text(), "Users: 50+");
    }

    #[test]
    fn test_to_text_empty_edges() {
        let output = RenderOutput {
            prefix: String::new(),
            value: 0,
            number: String::new(),
            step: 0,
            suffix: String::new(),
        };
        assert_eq!(output.to_text(), "0");
    }
}
