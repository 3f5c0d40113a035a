use mjava::interpreter::{Interpreter, RuntimeError};
use mjava::parser::parse_source;
use mjava::{run_source, run_sources, Error};

fn run_err(source: &str) -> RuntimeError {
    let program = parse_source(source).expect("program should parse");
    match Interpreter::from_programs(&[program]) {
        Ok(mut interpreter) => interpreter.run().expect_err("run should fail"),
        Err(e) => e,
    }
}

#[test]
fn test_integer_division_truncates() {
    let output = run_source(
        "class Main { void main() {\n\
         println(10 / 3);\n\
         println(10 % 3);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "3\n1\n");
}

#[test]
fn test_float_division_stays_fractional() {
    let output = run_source("class Main { void main() { println(10.0 / 4.0); } }").unwrap();
    assert_eq!(output, "2.5\n");
}

#[test]
fn test_division_by_zero() {
    let err = run_err("class Main { void main() { println(10 / 0); } }");
    assert!(matches!(err, RuntimeError::DivisionByZero { .. }));
}

#[test]
fn test_remainder_follows_dividend_sign() {
    let output = run_source(
        "class Main { void main() {\n\
         println(-10 % 3);\n\
         println(10 % -3);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "-1\n1\n");
}

#[test]
fn test_overload_resolution_end_to_end() {
    let output = run_source(
        "class Calculadora {\n\
         public int somar(int a, int b) { return a + b; }\n\
         public double somar(double a, double b) { return a + b; }\n\
         public int somar(int a, int b, int c) { return a + b + c; }\n\
         public double somar(int a, double b) { return a + b; }\n\
         }\n\
         class Main { void main() {\n\
         Calculadora calc = new Calculadora();\n\
         println(calc.somar(2, 3));\n\
         println(calc.somar(2.0, 3.0));\n\
         println(calc.somar(1, 2, 3));\n\
         println(calc.somar(2, 3.5));\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "5\n5.0\n6\n5.5\n");
}

#[test]
fn test_char_argument_accepted_by_int_parameter() {
    let output = run_source(
        "class Conversor {\n\
         public int codigo(int n) { return n; }\n\
         }\n\
         class Main { void main() {\n\
         Conversor c = new Conversor();\n\
         char letra = 'A';\n\
         println(c.codigo(letra));\n\
         println(letra + 1);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "65\n66\n");
}

#[test]
fn test_incompatible_equality_is_type_error() {
    let err = run_err("class Main { void main() { println(true == 1); } }");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));

    let err = run_err("class Main { void main() { println(\"1\" != 1); } }");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn test_ambiguous_overload_rejected() {
    let err = run_err(
        "class C {\n\
         public double f(int a, double b) { return b; }\n\
         public double f(double a, int b) { return a; }\n\
         }\n\
         class Main { void main() { C c = new C(); c.f(1, 2); } }",
    );
    assert!(matches!(err, RuntimeError::AmbiguousOverload { .. }));
}

#[test]
fn test_duplicate_signature_detected_at_load() {
    let err = run_err(
        "class C {\n\
         int f(int a) { return a; }\n\
         double f(int b) { return b; }\n\
         }\n\
         class Main { void main() { } }",
    );
    assert!(matches!(err, RuntimeError::DuplicateSignature { .. }));
}

#[test]
fn test_no_matching_signature() {
    let err = run_err(
        "class C { int f(int a) { return a; } }\n\
         class Main { void main() { C c = new C(); c.f(1.5); } }",
    );
    assert!(matches!(err, RuntimeError::NoMatchingSignature { .. }));
}

#[test]
fn test_protected_accessible_from_subclass() {
    let output = run_source(
        "class Animal {\n\
         protected void emitirSom() { println(\"Som do animal\"); }\n\
         }\n\
         class Cachorro extends Animal {\n\
         public void latir() { emitirSom(); }\n\
         }\n\
         class Main { void main() {\n\
         Cachorro rex = new Cachorro();\n\
         rex.latir();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Som do animal\n");
}

#[test]
fn test_private_field_denied_outside_class() {
    let err = run_err(
        "class Conta { private double saldo; }\n\
         class Main { void main() {\n\
         Conta conta = new Conta();\n\
         println(conta.saldo);\n\
         } }",
    );
    assert!(matches!(err, RuntimeError::AccessDenied { .. }));
}

#[test]
fn test_private_method_denied_outside_class() {
    let err = run_err(
        "class Conta {\n\
         private void atualizarSaldo() { }\n\
         }\n\
         class Main { void main() {\n\
         Conta conta = new Conta();\n\
         conta.atualizarSaldo();\n\
         } }",
    );
    assert!(matches!(err, RuntimeError::AccessDenied { .. }));
}

#[test]
fn test_package_private_denied_across_units() {
    let animal = "package animais;\n\
                  class Animal {\n\
                  void respirar() { println(\"respirando\"); }\n\
                  }";
    let main = "package app;\n\
                class Main { void main() {\n\
                Animal a = new Animal();\n\
                a.respirar();\n\
                } }";

    let err = run_sources(&[animal, main]).unwrap_err();
    match err {
        Error::Runtime(RuntimeError::AccessDenied { .. }) => {}
        other => panic!("expected access denial, got {:?}", other),
    }
}

#[test]
fn test_protected_accessible_within_unit() {
    let output = run_sources(&[
        "package animais;\n\
         class Animal { protected void emitirSom() { println(\"som\"); } }",
        "package animais;\n\
         class Main { void main() {\n\
         Animal a = new Animal();\n\
         a.emitirSom();\n\
         } }",
    ])
    .unwrap();
    assert_eq!(output, "som\n");
}

#[test]
fn test_constructor_runs_after_zeroing() {
    let output = run_source(
        "class Carro {\n\
         String modelo;\n\
         int ano;\n\
         public Carro(String modelo, int ano) {\n\
         this.modelo = modelo;\n\
         this.ano = ano;\n\
         }\n\
         void exibirInfo() { println(\"Modelo: \" + modelo + \" | Ano: \" + ano); }\n\
         }\n\
         class Main { void main() {\n\
         Carro carro1 = new Carro(\"Civic\", 2022);\n\
         carro1.exibirInfo();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Modelo: Civic | Ano: 2022\n");
}

#[test]
fn test_fields_start_at_zero_values() {
    let output = run_source(
        "class Pessoa {\n\
         String nome;\n\
         int idade;\n\
         double altura;\n\
         boolean ativo;\n\
         char inicial;\n\
         void exibir() {\n\
         println(\"[\" + nome + \"]\");\n\
         println(idade);\n\
         println(altura);\n\
         println(ativo);\n\
         }\n\
         }\n\
         class Main { void main() {\n\
         Pessoa p = new Pessoa();\n\
         p.exibir();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "[]\n0\n0.0\nfalse\n");
}

#[test]
fn test_constructor_overload_selects_by_arity() {
    let output = run_source(
        "class Pessoa {\n\
         String nome;\n\
         int idade;\n\
         public Pessoa(String nome, int idade) { this.nome = nome; this.idade = idade; }\n\
         public Pessoa(String nome) { this.nome = nome; this.idade = 0; }\n\
         void exibirInfo() { println(\"Nome: \" + nome + \" | Idade: \" + idade); }\n\
         }\n\
         class Main { void main() {\n\
         Pessoa p1 = new Pessoa(\"Arthur\", 25);\n\
         Pessoa p2 = new Pessoa(\"Lucas\");\n\
         p1.exibirInfo();\n\
         p2.exibirInfo();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Nome: Arthur | Idade: 25\nNome: Lucas | Idade: 0\n");
}

#[test]
fn test_ternary_operator() {
    let output = run_source(
        "class Main { void main() {\n\
         int idade = 25;\n\
         String status = (idade >= 18) ? \"Maior de idade\" : \"Menor de idade\";\n\
         println(\"Status: \" + status);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Status: Maior de idade\n");
}

#[test]
fn test_widening_in_argument_passing() {
    let output = run_source(
        "class C { double dobro(double x) { return x * 2; } }\n\
         class Main { void main() {\n\
         C c = new C();\n\
         byte b = 4;\n\
         println(c.dobro(b));\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "8.0\n");
}

#[test]
fn test_reference_semantics_for_objects() {
    let output = run_source(
        "class Caixa { int valor; }\n\
         class Main { void main() {\n\
         Caixa original = new Caixa();\n\
         Caixa alias = original;\n\
         alias.valor = 42;\n\
         println(original.valor);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "42\n");
}

#[test]
fn test_uninitialized_local_read_fails() {
    let err = run_err(
        "class Main { void main() {\n\
         int x;\n\
         println(x);\n\
         } }",
    );
    assert!(matches!(err, RuntimeError::UninitializedRead { .. }));
}

#[test]
fn test_block_scope_ends_at_brace() {
    let err = run_err(
        "class Main { void main() {\n\
         if (true) { int x = 10; }\n\
         println(x);\n\
         } }",
    );
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn test_array_index_out_of_bounds() {
    let err = run_err(
        "class Main { void main() {\n\
         int[] numeros = new int[3];\n\
         println(numeros[3]);\n\
         } }",
    );
    assert!(matches!(
        err,
        RuntimeError::IndexOutOfBounds {
            index: 3,
            length: 3,
            ..
        }
    ));
}

#[test]
fn test_null_reference_on_field_access() {
    let err = run_err(
        "class Carro { int ano; }\n\
         class Main { void main() {\n\
         Carro c;\n\
         c = null;\n\
         println(c.ano);\n\
         } }",
    );
    assert!(matches!(err, RuntimeError::NullReference { .. }));
}

#[test]
fn test_no_main_method() {
    let err = run_err("class Helper { int f() { return 1; } }");
    assert!(matches!(err, RuntimeError::NoMainMethod));
}

#[test]
fn test_switch_matches_and_breaks() {
    let output = run_source(
        "class Main { void main() {\n\
         int dia = 3;\n\
         switch (dia) {\n\
         case 1: println(\"Domingo\"); break;\n\
         case 2: println(\"Segunda-feira\"); break;\n\
         case 3: println(\"Terca-feira\"); break;\n\
         default: println(\"Dia invalido\");\n\
         }\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Terca-feira\n");
}

#[test]
fn test_switch_falls_through_without_break() {
    let output = run_source(
        "class Main { void main() {\n\
         switch (2) {\n\
         case 1: println(\"um\");\n\
         case 2: println(\"dois\");\n\
         case 3: println(\"tres\"); break;\n\
         default: println(\"outro\");\n\
         }\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "dois\ntres\n");
}

#[test]
fn test_switch_on_string() {
    let output = run_source(
        "class Main { void main() {\n\
         String fruta = \"uva\";\n\
         switch (fruta) {\n\
         case \"uva\": println(\"roxa\"); break;\n\
         default: println(\"desconhecida\");\n\
         }\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "roxa\n");
}

#[test]
fn test_string_methods() {
    let output = run_source(
        "class Main { void main() {\n\
         String texto = \"Java e incrivel\";\n\
         println(texto.length());\n\
         println(texto.substring(0, 4));\n\
         println(texto.toUpperCase());\n\
         println(texto.contains(\"incrivel\"));\n\
         println(texto.equals(\"Java e incrivel\"));\n\
         println(texto.charAt(0));\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "15\nJava\nJAVA E INCRIVEL\ntrue\ntrue\nJ\n");
}

#[test]
fn test_for_each_over_array_literal() {
    let output = run_source(
        "class Main { void main() {\n\
         String[] nomes = {\"Ana\", \"Bruno\", \"Carlos\"};\n\
         for (String nome : nomes) { println(nome); }\n\
         println(nomes.length);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Ana\nBruno\nCarlos\n3\n");
}

#[test]
fn test_method_hiding_uses_runtime_class() {
    let output = run_source(
        "class Animal { public void emitirSom() { println(\"Som do animal\"); } }\n\
         class Cachorro extends Animal { public void emitirSom() { println(\"Au au!\"); } }\n\
         class Main { void main() {\n\
         Cachorro rex = new Cachorro();\n\
         rex.emitirSom();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Au au!\n");
}

#[test]
fn test_instance_assignable_to_superclass_variable() {
    let output = run_source(
        "class Animal { public void emitirSom() { println(\"som\"); } }\n\
         class Cachorro extends Animal { public void emitirSom() { println(\"au\"); } }\n\
         class Main { void main() {\n\
         Animal a = new Cachorro();\n\
         a.emitirSom();\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "au\n");
}

#[test]
fn test_long_and_float_literals() {
    let output = run_source(
        "class Main { void main() {\n\
         long distancia = 9876543210L;\n\
         float preco = 19.99f;\n\
         println(distancia);\n\
         println(preco);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "9876543210\n19.99\n");
}

#[test]
fn test_byte_short_declarations_accept_small_literals() {
    let output = run_source(
        "class Main { void main() {\n\
         byte idade = 25;\n\
         short populacao = 15000;\n\
         println(idade);\n\
         println(populacao);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "25\n15000\n");
}

#[test]
fn test_out_of_range_literal_rejected() {
    let err = run_err("class Main { void main() { byte b = 300; } }");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn test_compound_assignment_chain() {
    let output = run_source(
        "class Main { void main() {\n\
         int x = 5;\n\
         x += 3;\n\
         x -= 2;\n\
         x *= 4;\n\
         x /= 6;\n\
         x %= 3;\n\
         println(x);\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "1\n");
}

#[test]
fn test_while_and_do_while() {
    let output = run_source(
        "class Main { void main() {\n\
         int contador = 0;\n\
         while (contador < 3) { println(\"Contador: \" + contador); contador++; }\n\
         int numero = 1;\n\
         do { println(\"Numero: \" + numero); numero++; } while (numero <= 2);\n\
         } }",
    )
    .unwrap();
    assert_eq!(
        output,
        "Contador: 0\nContador: 1\nContador: 2\nNumero: 1\nNumero: 2\n"
    );
}

#[test]
fn test_break_and_continue_in_for() {
    let output = run_source(
        "class Main { void main() {\n\
         for (int i = 0; i < 10; i++) {\n\
         if (i == 2) { continue; }\n\
         if (i == 5) { break; }\n\
         println(i);\n\
         }\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "0\n1\n3\n4\n");
}

#[test]
fn test_getter_setter_encapsulation() {
    let output = run_source(
        "class Pessoa {\n\
         private String nome;\n\
         public String getNome() { return nome; }\n\
         public void setNome(String novoNome) { this.nome = novoNome; }\n\
         }\n\
         class Main { void main() {\n\
         Pessoa p = new Pessoa();\n\
         p.setNome(\"Arthur\");\n\
         println(p.getNome());\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "Arthur\n");
}

#[test]
fn test_return_value_widens_to_declared_type() {
    let output = run_source(
        "class C { double metade(int n) { return n / 2; } }\n\
         class Main { void main() {\n\
         C c = new C();\n\
         println(c.metade(5));\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "2.0\n");
}

#[test]
fn test_recursion() {
    let output = run_source(
        "class Mat {\n\
         public int fatorial(int n) {\n\
         if (n <= 1) { return 1; }\n\
         return n * fatorial(n - 1);\n\
         }\n\
         }\n\
         class Main { void main() {\n\
         Mat m = new Mat();\n\
         println(m.fatorial(5));\n\
         } }",
    )
    .unwrap();
    assert_eq!(output, "120\n");
}
