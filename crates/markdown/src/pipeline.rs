//! The minimal host contract the facade registers against: an ordered
//! list of inline text passes run over fully tokenized text.

use std::borrow::Cow;

/// Trait for inline text substitution passes.
pub trait InlineTransform {
    /// Transform one text run, returning it owned or borrowed.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> InlineTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Ordered inline passes applied left to right over a document.
#[derive(Default)]
pub struct InlinePipeline {
    passes: Vec<Box<dyn InlineTransform>>,
}

impl InlinePipeline {
    /// Creates an empty pipeline.
    pub fn new() -> InlinePipeline {
        InlinePipeline { passes: Vec::new() }
    }

    /// Appends a pass; passes run in insertion order.
    pub fn add_pass<T: InlineTransform + 'static>(&mut self, pass: T) {
        self.passes.push(Box::new(pass));
    }

    /// Number of registered passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether no pass is registered.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass over the input in order.
    pub fn run(&self, input: &str) -> String {
        let mut current = Cow::Borrowed(input);
        for pass in &self.passes {
            let next = pass.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }
        current.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl InlineTransform for Upper {
        fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
            Cow::Owned(input.to_ascii_uppercase())
        }
    }

    struct Suffix;

    impl InlineTransform for Suffix {
        fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
            Cow::Owned(format!("{input}!"))
        }
    }

    #[test]
    fn passes_run_in_insertion_order() {
        let mut pipeline = InlinePipeline::new();
        pipeline.add_pass(Upper);
        pipeline.add_pass(Suffix);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.run("abc"), "ABC!");
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = InlinePipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run("abc"), "abc");
    }
}
