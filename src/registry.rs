use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One macro definition as it appears in a registry source.
///
/// Every field is optional in the source files; an absent field means
/// false/empty. `children` and `parents` are advisory nesting hints carried
/// through for consumers; pairing and diagnostics do not enforce them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MacroDef {
    pub name: Option<String>,
    /// A container macro expects a matching opening and closing tag pair.
    pub container: bool,
    pub children: Vec<String>,
    pub parents: Vec<String>,
    pub deprecated: bool,
    /// Replacement names listed in the deprecation warning, in order.
    pub deprecated_suggestions: Vec<String>,
}

impl MacroDef {
    pub fn container() -> MacroDef {
        MacroDef {
            container: true,
            ..MacroDef::default()
        }
    }
}

/// The merged mapping of macro names to definitions used to validate tags.
///
/// A name maps to at most one definition. Merging is last-write-wins per
/// name: a later source replaces a colliding definition entirely, never
/// field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    macros: HashMap<String, MacroDef>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.macros.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, def: MacroDef) {
        self.macros.insert(name.into(), def);
    }

    /// Merges `macros` over this registry, overwriting colliding names.
    pub fn extend(&mut self, macros: HashMap<String, MacroDef>) {
        self.macros.extend(macros);
    }

    /// Merges another registry over this one, overwriting colliding names.
    pub fn merge(&mut self, other: Registry) {
        self.macros.extend(other.macros);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// The stock SugarCube 2 macro set, the baseline every workspace source
    /// is merged over.
    pub fn builtin() -> Registry {
        const SIMPLE: &[&str] = &[
            "set", "unset", "run", "print", "=", "-", "include", "return", "goto", "actions",
            "back", "checkbox", "radiobutton", "textbox", "numberbox", "textarea", "addclass",
            "removeclass", "toggleclass", "copy", "remove", "audio", "cacheaudio", "masteraudio",
            "playlist", "removeaudiogroup", "waitforaudio",
        ];
        const CONTAINER: &[&str] = &[
            "if", "for", "switch", "button", "link", "linkappend", "linkprepend", "linkreplace",
            "append", "prepend", "replace", "widget", "silently", "nobr", "capture", "repeat",
            "timed", "type", "cycle", "listbox", "createaudiogroup", "createplaylist", "script",
            "done",
        ];
        // Opener → the child macros valid inside it.
        const CHILDREN: &[(&str, &[&str])] = &[
            ("if", &["elseif", "else"]),
            ("switch", &["case", "default"]),
            ("for", &["break", "continue"]),
            ("repeat", &["stop"]),
            ("timed", &["next"]),
            ("cycle", &["option", "optionsfrom"]),
            ("listbox", &["option", "optionsfrom"]),
            ("createaudiogroup", &["track"]),
            ("createplaylist", &["track"]),
        ];
        // Child macro → the containers it may appear in.
        const PARENTS: &[(&str, &[&str])] = &[
            ("elseif", &["if"]),
            ("else", &["if"]),
            ("case", &["switch"]),
            ("default", &["switch"]),
            ("break", &["for"]),
            ("continue", &["for"]),
            ("stop", &["repeat"]),
            ("next", &["timed"]),
            ("option", &["cycle", "listbox"]),
            ("optionsfrom", &["cycle", "listbox"]),
            ("track", &["createaudiogroup", "createplaylist"]),
        ];
        const DEPRECATED: &[(&str, bool, &[&str])] = &[
            ("click", true, &["link", "button"]),
            ("display", false, &["include"]),
            ("remember", false, &["set"]),
            ("forget", false, &["unset"]),
            ("setplaylist", false, &["createplaylist"]),
            ("stopallaudio", false, &["audio"]),
        ];

        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| (*s).to_string()).collect()
        }

        let mut registry = Registry::new();
        for name in SIMPLE {
            registry.insert(*name, MacroDef::default());
        }
        for name in CONTAINER {
            registry.insert(*name, MacroDef::container());
        }
        for (name, children) in CHILDREN {
            if let Some(def) = registry.macros.get_mut(*name) {
                def.children = names(children);
            }
        }
        for (name, parents) in PARENTS {
            registry.insert(
                *name,
                MacroDef {
                    parents: names(parents),
                    ..MacroDef::default()
                },
            );
        }
        for (name, container, suggestions) in DEPRECATED {
            registry.insert(
                *name,
                MacroDef {
                    container: *container,
                    deprecated: true,
                    deprecated_suggestions: names(suggestions),
                    ..MacroDef::default()
                },
            );
        }
        registry
    }
}

impl FromIterator<(String, MacroDef)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, MacroDef)>>(iter: I) -> Registry {
        Registry {
            macros: iter.into_iter().collect(),
        }
    }
}
