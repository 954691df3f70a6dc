use std::collections::HashMap;

use crate::values::Value;

// Global bindings plus one map per in-flight call. Reads go through the
// top frame then the globals, writes target the top frame when one
// exists. There is no 'global' declaration and nested functions do not
// capture enclosing locals, only the globals stay visible across calls.
#[derive(Debug, Default, PartialEq)]
pub struct Env {
    globals: HashMap<String, Value>,
    frames: Vec<HashMap<String, Value>>,
}

impl Env {
    pub fn new() -> Self {
        Default::default()
    }

    // Unbound names read as None, the language has no name errors
    pub fn get(&self, name: &str) -> Value {
        if let Some(frame) = self.frames.last() {
            if let Some(value) = frame.get(name) {
                return value.clone();
            }
        }

        self.globals.get(name).cloned().unwrap_or(Value::None)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(name.to_string(), value);
            }
            None => {
                self.globals.insert(name.to_string(), value);
            }
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    #[test]
    fn unbound_name_reads_as_none() {
        let env = Env::new();
        assert_eq!(env.get("missing"), Value::None);
    }

    #[test]
    fn set_and_get_a_global() {
        let mut env = Env::new();
        env.set("mass", int(120));

        assert_eq!(env.get("mass"), int(120));
    }

    #[test]
    fn writes_target_the_top_frame() {
        let mut env = Env::new();
        env.set("x", int(1));

        env.push_frame();
        env.set("x", int(2));
        assert_eq!(env.get("x"), int(2));

        env.pop_frame();
        assert_eq!(env.get("x"), int(1));
    }

    #[test]
    fn globals_stay_visible_from_a_frame() {
        let mut env = Env::new();
        env.set("g", Value::Str("shared".into()));

        env.push_frame();
        assert_eq!(env.get("g"), Value::Str("shared".into()));
        env.pop_frame();
    }

    #[test]
    fn only_the_top_frame_is_searched() {
        let mut env = Env::new();

        env.push_frame();
        env.set("outer_local", int(7));
        env.push_frame();

        // The caller's locals are not visible from the callee
        assert_eq!(env.get("outer_local"), Value::None);

        env.pop_frame();
        assert_eq!(env.get("outer_local"), int(7));
        env.pop_frame();
    }

    #[test]
    fn frame_locals_vanish_on_pop() {
        let mut env = Env::new();

        env.push_frame();
        env.set("tmp", int(3));
        env.pop_frame();

        assert_eq!(env.get("tmp"), Value::None);
    }
}
