//! Class table: registered class declarations, inheritance queries, and the
//! duplicate signature check performed at load time.

use super::errors::RuntimeError;
use crate::memory::value::Kind;
use crate::parser::ast::{ClassDecl, FieldDecl, MethodDecl, Param, Program};
use rustc_hash::FxHashMap;

/// Render a parameter list as the signature string used in diagnostics
pub fn signature_of(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| p.param_type.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn param_kinds(params: &[Param]) -> Vec<Kind> {
    params.iter().map(|p| Kind::of_type(&p.param_type)).collect()
}

/// All classes known to an interpreter run
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: FxHashMap<String, ClassDecl>,
    /// Compilation unit each class was declared in
    units: FxHashMap<String, String>,
    /// Registration order, used to pick the entry class deterministically
    order: Vec<String>,
}

impl ClassTable {
    /// Build the table from parsed compilation units.
    ///
    /// Rejects duplicate class names, duplicate method and constructor
    /// signatures within a class, and extends clauses naming an unknown
    /// class.
    pub fn from_programs(programs: &[Program]) -> Result<Self, RuntimeError> {
        let mut table = ClassTable::default();

        for program in programs {
            for class in &program.classes {
                if table.classes.contains_key(&class.name) {
                    return Err(RuntimeError::UnsupportedOperation {
                        message: format!("class '{}' is declared more than once", class.name),
                        location: class.location,
                    });
                }
                Self::check_signatures(class)?;
                table.units.insert(class.name.clone(), program.unit.clone());
                table.order.push(class.name.clone());
                table.classes.insert(class.name.clone(), class.clone());
            }
        }

        for class in table.order.iter() {
            let decl = &table.classes[class];
            if let Some(parent) = &decl.superclass {
                if !table.classes.contains_key(parent) {
                    return Err(RuntimeError::UndefinedClass {
                        name: parent.clone(),
                        location: decl.location,
                    });
                }
            }
        }

        Ok(table)
    }

    /// Reject a class declaring two methods (or two constructors) with the
    /// same name and parameter kind list
    fn check_signatures(class: &ClassDecl) -> Result<(), RuntimeError> {
        let mut seen: Vec<(&str, Vec<Kind>)> = Vec::new();

        for method in &class.methods {
            let kinds = param_kinds(&method.params);
            if seen
                .iter()
                .any(|(name, k)| *name == method.name && *k == kinds)
            {
                return Err(RuntimeError::DuplicateSignature {
                    class: class.name.clone(),
                    method: method.name.clone(),
                    signature: signature_of(&method.params),
                    location: method.location,
                });
            }
            seen.push((&method.name, kinds));
        }

        let mut ctor_seen: Vec<Vec<Kind>> = Vec::new();
        for ctor in &class.ctors {
            let kinds = param_kinds(&ctor.params);
            if ctor_seen.contains(&kinds) {
                return Err(RuntimeError::DuplicateSignature {
                    class: class.name.clone(),
                    method: class.name.clone(),
                    signature: signature_of(&ctor.params),
                    location: ctor.location,
                });
            }
            ctor_seen.push(kinds);
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    /// Compilation unit the class was declared in
    pub fn unit_of(&self, class: &str) -> &str {
        self.units.get(class).map(String::as_str).unwrap_or("default")
    }

    /// Whether `class` is `ancestor` or transitively extends it
    pub fn is_same_or_descendant(&self, class: &str, ancestor: &str) -> bool {
        let mut current = Some(class);
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            current = self
                .classes
                .get(name)
                .and_then(|c| c.superclass.as_deref());
        }
        false
    }

    /// Find a field by walking the inheritance chain from `class` upward.
    /// Returns the declaring class together with the declaration, nearest
    /// declaration first.
    pub fn find_field(&self, class: &str, field: &str) -> Option<(&str, &FieldDecl)> {
        let mut current = Some(class);
        while let Some(name) = current {
            let decl = self.classes.get(name)?;
            if let Some(f) = decl.fields.iter().find(|f| f.name == field) {
                return Some((&decl.name, f));
            }
            current = decl.superclass.as_deref();
        }
        None
    }

    /// Find the overload set for a method name, walking the inheritance
    /// chain from `class` upward. The nearest class declaring the name wins;
    /// its overloads hide any declared further up.
    pub fn find_methods(&self, class: &str, method: &str) -> Option<(&str, Vec<&MethodDecl>)> {
        let mut current = Some(class);
        while let Some(name) = current {
            let decl = self.classes.get(name)?;
            let overloads: Vec<&MethodDecl> =
                decl.methods.iter().filter(|m| m.name == method).collect();
            if !overloads.is_empty() {
                return Some((&decl.name, overloads));
            }
            current = decl.superclass.as_deref();
        }
        None
    }

    /// Every instance field of a class, inherited fields included. When a
    /// subclass redeclares a name, its declaration is the one kept.
    pub fn instance_fields(&self, class: &str) -> Vec<&FieldDecl> {
        let mut fields: Vec<&FieldDecl> = Vec::new();
        let mut current = Some(class);
        while let Some(name) = current {
            let Some(decl) = self.classes.get(name) else {
                break;
            };
            for f in &decl.fields {
                if !fields.iter().any(|existing| existing.name == f.name) {
                    fields.push(f);
                }
            }
            current = decl.superclass.as_deref();
        }
        fields
    }

    /// The entry class: the first registered class (in declaration order)
    /// with a parameterless method named `main`
    pub fn main_class(&self) -> Option<&ClassDecl> {
        self.order
            .iter()
            .map(|name| &self.classes[name])
            .find(|class| {
                class
                    .methods
                    .iter()
                    .any(|m| m.name == "main" && m.params.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn test_duplicate_signature_rejected() {
        let program = parse_source(
            "class Calculadora {\n\
             int somar(int a, int b) { return a + b; }\n\
             int somar(int x, int y) { return x + y; }\n\
             }",
        )
        .unwrap();

        let err = ClassTable::from_programs(&[program]).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateSignature { .. }));
    }

    #[test]
    fn test_distinct_arity_is_not_duplicate() {
        let program = parse_source(
            "class Calculadora {\n\
             int somar(int a, int b) { return a + b; }\n\
             int somar(int a, int b, int c) { return a + b + c; }\n\
             double somar(double a, double b) { return a + b; }\n\
             }",
        )
        .unwrap();

        assert!(ClassTable::from_programs(&[program]).is_ok());
    }

    #[test]
    fn test_inherited_field_lookup() {
        let program = parse_source(
            "class Animal { protected String nome; }\n\
             class Cachorro extends Animal { }",
        )
        .unwrap();

        let table = ClassTable::from_programs(&[program]).unwrap();
        let (owner, field) = table.find_field("Cachorro", "nome").unwrap();
        assert_eq!(owner, "Animal");
        assert_eq!(field.name, "nome");
    }

    #[test]
    fn test_descendant_check() {
        let program = parse_source(
            "class Animal { }\n\
             class Cachorro extends Animal { }\n\
             class Gato extends Animal { }",
        )
        .unwrap();

        let table = ClassTable::from_programs(&[program]).unwrap();
        assert!(table.is_same_or_descendant("Cachorro", "Animal"));
        assert!(table.is_same_or_descendant("Animal", "Animal"));
        assert!(!table.is_same_or_descendant("Animal", "Cachorro"));
        assert!(!table.is_same_or_descendant("Gato", "Cachorro"));
    }

    #[test]
    fn test_nearest_declaration_hides_base_overloads() {
        let program = parse_source(
            "class Animal { void emitirSom() { } void emitirSom(int vezes) { } }\n\
             class Cachorro extends Animal { void emitirSom() { } }",
        )
        .unwrap();

        let table = ClassTable::from_programs(&[program]).unwrap();
        let (owner, overloads) = table.find_methods("Cachorro", "emitirSom").unwrap();
        assert_eq!(owner, "Cachorro");
        assert_eq!(overloads.len(), 1);
    }

    #[test]
    fn test_unknown_superclass_rejected() {
        let program = parse_source("class Cachorro extends Animal { }").unwrap();
        let err = ClassTable::from_programs(&[program]).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedClass { .. }));
    }

    #[test]
    fn test_main_class_is_first_declared() {
        let program = parse_source(
            "class Helper { }\n\
             class Primeiro { void main() { } }\n\
             class Segundo { void main() { } }",
        )
        .unwrap();

        let table = ClassTable::from_programs(&[program]).unwrap();
        assert_eq!(table.main_class().unwrap().name, "Primeiro");
    }
}
