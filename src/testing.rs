use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use crate::{dom::ElementHandle, theme::PreferenceStore, timer::Scheduler};

#[derive(Default)]
struct FakeNode {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    offset_top: f64,
    client_height: f64,
    next_sibling: Option<FakeElement>,
}

#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<FakeNode>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_style(self, property: &str, value: &str) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn with_layout(self, offset_top: f64, client_height: f64) -> Self {
        {
            let mut node = self.0.borrow_mut();
            node.offset_top = offset_top;
            node.client_height = client_height;
        }
        self
    }

    pub fn with_next_sibling(self, sibling: FakeElement) -> Self {
        self.0.borrow_mut().next_sibling = Some(sibling);
        self
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }
}

impl ElementHandle for FakeElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|value| value == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|value| value != class);
    }

    fn toggle_class(&self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn style(&self, property: &str) -> String {
        self.0
            .borrow()
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn offset_top(&self) -> f64 {
        self.0.borrow().offset_top
    }

    fn client_height(&self) -> f64 {
        self.0.borrow().client_height
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.0.borrow().next_sibling.clone()
    }
}

struct PendingTask {
    due: u64,
    sequence: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now: u64,
    next_sequence: u64,
    pending: Vec<PendingTask>,
}

/// Virtual-time scheduler. Nothing runs until [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<ManualClock>>);

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.0.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Runs every task due within the next `ms` milliseconds, in due order,
    /// including tasks scheduled by the tasks themselves.
    pub fn advance(&self, ms: u64) {
        let deadline = self.now() + ms;

        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                let position = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= deadline)
                    .min_by_key(|(_, task)| (task.due, task.sequence))
                    .map(|(position, _)| position);

                position.map(|position| {
                    let task = clock.pending.remove(position);
                    clock.now = task.due;
                    task.task
                })
            };

            match next {
                Some(task) => task(),
                None => break,
            }
        }

        self.0.borrow_mut().now = deadline;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut clock = self.0.borrow_mut();
        let due = clock.now + u64::from(delay_ms);
        let sequence = clock.next_sequence;
        clock.next_sequence += 1;
        clock.pending.push(PendingTask {
            due,
            sequence,
            task,
        });
    }
}

#[derive(Default)]
pub struct MemoryStore(RefCell<HashMap<String, String>>);

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
}
