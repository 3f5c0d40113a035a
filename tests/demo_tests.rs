//! Runs each program under demos/ and checks its complete output.

use mjava::run_source;

fn run_demo(name: &str) -> String {
    let path = format!("{}/demos/{}", env!("CARGO_MANIFEST_DIR"), name);
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("could not read {}: {}", path, e));
    run_source(&source).unwrap_or_else(|e| panic!("{} failed: {}", name, e))
}

#[test]
fn test_tipos_primitivos() {
    let output = run_demo("tipos_primitivos.mj");
    let expected = "\
Idade mínima: 25
População: 15000
Brasil: 210000000
Distância: 9876543210
Preço: 19.99
Saldo: 15345.67
Letra: A
Ativo: true
Soma: 13
Subtração: 7
Multiplicação: 30
Divisão inteira: 3
Resto: 1
x final: 1
Igual: false
Diferente: true
Menor: true
E lógico: false
Ou lógico: true
Não lógico: false
Status: Maior de idade
O número 7 é: Ímpar
";
    assert_eq!(output, expected);
}

#[test]
fn test_estruturas_de_controle() {
    let output = run_demo("estruturas_de_controle.mj");
    let expected = "\
Você é maior de idade.
Aprovado!
Terça-feira
Contador: 0
Contador: 1
Contador: 2
Contador: 3
Contador: 4
Número: 1
Número: 2
Número: 3
Valor de i: 0
Valor de i: 1
Valor de i: 2
Valor de i: 3
Valor de i: 4
";
    assert_eq!(output, expected);
}

#[test]
fn test_arrays_strings() {
    let output = run_demo("arrays_strings.mj");
    let expected = "\
10
Bruno
Maçã
Uva
Ana
Bruno
Carlos
Ana
Bruno
Carlos
15
Java
JAVA É INCRÍVEL
java é incrível
true
true
Arthur tem 25 anos.
";
    assert_eq!(output, expected);
}

#[test]
fn test_metodos_escopo() {
    let output = run_demo("metodos_escopo.mj");
    let expected = "\
Resultado: 15
Dentro do bloco: 10
Fora do bloco: 1
";
    assert_eq!(output, expected);
}

#[test]
fn test_construtores() {
    let output = run_demo("construtores.mj");
    let expected = "\
Modelo: Civic | Ano: 2022
Nome: Arthur | Idade: 25
Nome: Lucas | Idade: 0
";
    assert_eq!(output, expected);
}

#[test]
fn test_classes_objetos() {
    let output = run_demo("classes_objetos.mj");
    let expected = "\
Biiiiiii!
Modelo: Fusca | Ano: 1975
Nome: Arthur
";
    assert_eq!(output, expected);
}

#[test]
fn test_modificadores_de_acesso() {
    let output = run_demo("modificadores_de_acesso.mj");
    let expected = "\
Oi!
Som do animal
Au au!
Saldo: 150.0
";
    assert_eq!(output, expected);
}

#[test]
fn test_sobrecarga_de_metodos() {
    let output = run_demo("sobrecarga_de_metodos.mj");
    let expected = "\
5
9
5.6
5.5
";
    assert_eq!(output, expected);
}
