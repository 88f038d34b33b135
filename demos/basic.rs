use rpn_rs::engine::{eval, eval_with, evaluate, postfix_string};
use std::collections::HashMap;

fn main() {
    // Evaluate the same expression in each numeric kind
    let expr = "7/2 + 3*4";
    let as_int = eval::<i32>(expr).unwrap_or_else(|e| {
        panic!("{}", e);
    });
    let as_float = eval::<f64>(expr).unwrap_or_else(|e| {
        panic!("{}", e);
    });
    println!("{} = {} (i32), {} (f64)", expr, as_int, as_float);

    // Inspect the postfix form
    match postfix_string("-(1+2)^2") {
        Ok(postfix) => println!("-(1+2)^2 in postfix: {}", postfix),
        Err(e) => println!("conversion failed: {}", e),
    }

    // Substitute variables
    let mut vars = HashMap::new();
    vars.insert("width", 12.5);
    vars.insert("height", 4.0);
    match eval_with::<f64, _>("width * height / 2", &vars) {
        Ok(area) => println!("triangle area = {}", area),
        Err(e) => println!("error: {}", e),
    }

    // Flag form and error reporting
    let (ok, value) = evaluate::<i32>("2+*3");
    println!("2+*3 -> success: {}, value: {}", ok, value);
    if let Err(e) = eval::<i64>("10 / (5 - 5)") {
        println!("10 / (5 - 5) -> {} (code {})", e, e.error_code());
    }
}
