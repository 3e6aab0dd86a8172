use crate::db::connection::{init_db, Database};
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod block;
mod cache;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod stores;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let db = Database::new("listings.sqlite3");

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // Explicit one-shot registration in place of init hooks. Failure is
    // logged but not fatal; the block reports the missing content type
    // at render time.
    match db::registration::install(&db) {
        Ok(reg) => println!(
            "Registered content type '{}' ({} taxonomies, {} meta fields)",
            reg.content_type,
            reg.taxonomies.len(),
            reg.meta_field_count
        ),
        Err(e) => eprintln!("Registration failed: {e}"),
    }

    match db::properties::seed_demo_properties(&db) {
        Ok(0) => {}
        Ok(n) => println!("Seeded {n} demo properties"),
        Err(e) => eprintln!("Demo seed failed: {e}"),
    }

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let serve_db = db.clone();
    let result = server.serve(move |req, _info| match handle(req, &serve_db) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    // Deactivation cleanup: fingerprinted cache entries do not outlive
    // the server.
    if let Err(e) = db::registration::uninstall(&db) {
        eprintln!("Cache purge on shutdown failed: {e}");
    }

    println!("Server shut down cleanly.");
}
