use std::fs::File;
use std::io::prelude::*;

use serde_derive::Serialize;

#[derive(Debug, Serialize)]
pub struct Product {
    pub name: String,
    pub manufacturer: String,
    pub price: i32,
}

impl Product {
    #[allow(dead_code)]
    pub fn new(name: &str, manufacturer: &str, price: i32) -> Product {
        Product { name: name.to_owned(), manufacturer: manufacturer.to_owned(), price }
    }
}

#[derive(Debug, Serialize)]
pub struct Review {
    pub title: String,
    pub stars: u8,
    #[serde(skip)]
    pub paragraphs: Vec<String>,
}

impl Review {
    #[allow(dead_code)]
    pub fn new(title: &str, stars: u8, paragraphs: &[&str]) -> Review {
        Review {
            title: title.to_owned(),
            stars,
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[allow(dead_code)]
pub fn catalog() -> Vec<(&'static str, Vec<Product>)> {
    vec![
        (
            "Phones",
            vec![Product::new("Moto G", "Motorola", 100), Product::new("Pixel", "Google", 500)],
        ),
        ("Tablets", vec![Product::new("Tab S", "Samsung", 300)]),
    ]
}

#[allow(dead_code)]
pub fn reviews() -> Vec<Review> {
    vec![Review::new("Great phone", 5, &["Fast", "Cheap"]), Review::new("Meh", 2, &["Slow"])]
}

#[allow(dead_code)]
pub fn read_file(path: &str) -> String {
    let mut f = File::open(path).unwrap();
    let mut input = String::new();
    f.read_to_string(&mut input).unwrap();
    input
}
