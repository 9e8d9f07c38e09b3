use regex::Regex;

const VARIABLE_NAME_PATTERN: &str = "[a-zA-Z][a-zA-Z0-9_]*";
const OBJECT_NAME_PATTERN: &str = "[A-Z].*";
const DECLARATION_END_PATTERN: &str = " *[=;,)]";
const PRIMITIVE_TYPES: &str = "short|int|long|float|double|boolean|char|byte|\
                               Short|Integer|Long|Float|Double|Boolean|Char|Byte";
const VISIBILITY: &str = "public|private|protected";
const MODIFIERS: &str = "(?:(?:static|final|abstract|synchronized|native) )*";

/// Declaration grammar a fragment matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Primitive,
    Object,
    Function,
}

/// Split a statement into fragments that each hold at most one declaration.
///
/// Text before each opening parenthesis (the parenthesis included) becomes its
/// own fragment, isolating parameter lists from the declarator in front of
/// them. What is left is split into `;` clauses, and clauses with several
/// comma-separated parts into one fragment per part, each re-suffixed with the
/// separator it was split on.
#[must_use]
pub fn break_apart_line(line: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut rest = line;

    loop {
        match rest.find('(') {
            Some(index) if index > 0 && index != rest.len() - 1 => {
                fragments.push(rest[..=index].to_string());
                rest = &rest[index + 1..];
            }
            Some(index) if index > 0 => {
                fragments.push(rest.to_string());
                return fragments;
            }
            _ => break,
        }
    }

    for clause in rest.split(';').filter(|c| !c.is_empty()) {
        let parts: Vec<&str> = clause.split(',').filter(|p| !p.is_empty()).collect();
        if let [single] = parts.as_slice() {
            fragments.push(format!("{single};"));
        } else {
            fragments.extend(parts.iter().map(|part| format!("{part},")));
        }
    }

    fragments
}

/// Recognizes declarations in statement fragments and extracts the declared name.
pub struct DeclarationClassifier {
    primitive: Regex,
    object: Regex,
    function: Regex,
    variable_group: Regex,
    function_group: Regex,
}

impl Default for DeclarationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationClassifier {
    /// # Panics
    /// Panics if a built-in pattern fails to compile, which would be a bug.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primitive: Regex::new(&format!(
                r"\b(?:{PRIMITIVE_TYPES}) {VARIABLE_NAME_PATTERN}{DECLARATION_END_PATTERN}"
            ))
            .expect("Invalid regex"),
            object: Regex::new(&format!(
                "{OBJECT_NAME_PATTERN} {VARIABLE_NAME_PATTERN}{DECLARATION_END_PATTERN}"
            ))
            .expect("Invalid regex"),
            function: Regex::new(&format!(
                "(?:{VISIBILITY}) {MODIFIERS}{VARIABLE_NAME_PATTERN} {VARIABLE_NAME_PATTERN}"
            ))
            .expect("Invalid regex"),
            variable_group: Regex::new(&format!(
                " ({VARIABLE_NAME_PATTERN}){DECLARATION_END_PATTERN}"
            ))
            .expect("Invalid regex"),
            function_group: Regex::new(&format!(
                "(?:{VISIBILITY}) {MODIFIERS}{VARIABLE_NAME_PATTERN} ({VARIABLE_NAME_PATTERN})"
            ))
            .expect("Invalid regex"),
        }
    }

    #[must_use]
    pub fn is_primitive_declaration(&self, fragment: &str) -> bool {
        self.primitive.is_match(fragment)
    }

    #[must_use]
    pub fn is_object_declaration(&self, fragment: &str) -> bool {
        self.object.is_match(fragment)
    }

    #[must_use]
    pub fn is_function_declaration(&self, fragment: &str) -> bool {
        self.function.is_match(fragment)
    }

    /// Classify a fragment; primitive wins over object, object over function.
    #[must_use]
    pub fn classify(&self, fragment: &str) -> Option<Declaration> {
        if self.is_primitive_declaration(fragment) {
            Some(Declaration::Primitive)
        } else if self.is_object_declaration(fragment) {
            Some(Declaration::Object)
        } else if self.is_function_declaration(fragment) {
            Some(Declaration::Function)
        } else {
            None
        }
    }

    /// Name declared by the fragment, or `None` when it declares nothing.
    #[must_use]
    pub fn declared_identifier<'a>(&self, fragment: &'a str) -> Option<&'a str> {
        let group = match self.classify(fragment)? {
            Declaration::Primitive | Declaration::Object => &self.variable_group,
            Declaration::Function => &self.function_group,
        };
        group
            .captures(fragment)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
