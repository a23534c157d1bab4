//! Integration tests for end-to-end module generation and documentation.

use modgen::codegen::{create_module, parse_field_tokens, patch_router_content};
use modgen::config::GeneratorConfig;
use modgen::docs::{update_existing_modules_documentation, DocOptions};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn parse(tokens: &[&str]) -> modgen::codegen::ParsedFields {
    parse_field_tokens(&tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>())
}

fn project(dir: &TempDir) -> (GeneratorConfig, DocOptions) {
    let config = GeneratorConfig {
        modules_dir: dir.path().join("src/app/modules"),
        routes_file: dir.path().join("src/routes/index.ts"),
    };
    std::fs::create_dir_all(dir.path().join("src/routes")).unwrap();
    std::fs::write(
        &config.routes_file,
        "import express from 'express';\n\nconst router = express.Router();\n\nconst apiRoutes = [\n];\n\napiRoutes.forEach((route) => router.use(route.path, route.route));\n\nexport default router;\n",
    )
    .unwrap();
    let doc_options = DocOptions {
        postman_dir: dir.path().join("postman"),
        swagger_file: dir.path().join("swagger.json"),
        ..Default::default()
    };
    (config, doc_options)
}

#[test]
fn test_full_module_generation() {
    let dir = TempDir::new().unwrap();
    let (config, doc_options) = project(&dir);

    let parsed = parse(&[
        "name!:string",
        "email:string",
        "age:number",
        "status:enum[active,inactive]",
        "items:array:object:sku:string:qty!:number",
    ]);
    create_module("order", &parsed, &config, &doc_options).unwrap();

    let module_dir = config.modules_dir.join("order");

    // interface: enum type, nested item interface, main interface
    let interface = std::fs::read_to_string(module_dir.join("order.interface.ts")).unwrap();
    assert!(interface.contains("export enum StatusEnum {"));
    assert!(interface.contains("export interface ItemsItem {"));
    assert!(interface.contains("export interface IOrder {"));
    assert!(interface.contains("  status: StatusEnum;"));
    assert!(interface.contains("  items: ItemsItem[];"));

    // model: required marker inside the type braces, enum default
    let model = std::fs::read_to_string(module_dir.join("order.model.ts")).unwrap();
    assert!(model.contains("  name: { type: String, required: true },"));
    assert!(model.contains("default: 'active'"));
    assert!(model.contains("const itemsItemSchema = new Schema({"));
    assert!(model.contains("  qty: { type: Number, required: true },"));

    // validation: nested zod schema and enum validator
    let validation = std::fs::read_to_string(module_dir.join("order.validation.ts")).unwrap();
    assert!(validation.contains("const itemsItemSchema = z.object({"));
    assert!(validation.contains("status: z.enum(['active', 'inactive'])"));

    // route references only names the other artifacts export
    let route = std::fs::read_to_string(module_dir.join("order.route.ts")).unwrap();
    let controller = std::fs::read_to_string(module_dir.join("order.controller.ts")).unwrap();
    for handler in ["createOrder", "updateOrder", "deleteOrder", "getOrder", "getAllOrders"] {
        assert!(route.contains(&format!("OrderController.{}", handler)));
        assert!(controller.contains(&format!("const {} = catchAsync(", handler)));
    }

    // router registration
    let router = std::fs::read_to_string(&config.routes_file).unwrap();
    assert!(router.contains("import { OrderRoutes } from '../app/modules/order/order.route'"));
    assert!(router.contains("{ path: '/order', route: OrderRoutes }"));

    // documentation
    let collection: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("postman/order.postman_collection.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(collection["info"]["name"], "Order API");
    assert_eq!(collection["item"].as_array().unwrap().len(), 5);

    let swagger: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("swagger.json")).unwrap())
            .unwrap();
    assert!(swagger["paths"]["/order"]["post"].is_object());
    assert!(swagger["components"]["schemas"]["ItemsItem"].is_object());
}

#[test]
fn test_rerun_preserves_existing_module() {
    let dir = TempDir::new().unwrap();
    let (config, doc_options) = project(&dir);

    let parsed = parse(&["name:string"]);
    create_module("user", &parsed, &config, &doc_options).unwrap();

    let model_path = config.modules_dir.join("user/user.model.ts");
    std::fs::write(&model_path, "// manually edited\n").unwrap();

    let changed = parse(&["name:string", "email:string"]);
    create_module("user", &changed, &config, &doc_options).unwrap();

    assert_eq!(
        std::fs::read_to_string(&model_path).unwrap(),
        "// manually edited\n"
    );
}

#[test]
fn test_router_patching_is_idempotent_across_modules() {
    let dir = TempDir::new().unwrap();
    let (config, doc_options) = project(&dir);

    create_module("user", &parse(&["name:string"]), &config, &doc_options).unwrap();
    create_module("order", &parse(&["total:number"]), &config, &doc_options).unwrap();

    let router = std::fs::read_to_string(&config.routes_file).unwrap();
    assert_eq!(router.matches("UserRoutes").count(), 2); // import + registration
    assert!(router.contains("{ path: '/user', route: UserRoutes },\n  { path: '/order', route: OrderRoutes }"));

    // patching again changes nothing
    let repatched = patch_router_content(&router, "user", "User");
    assert_eq!(router, repatched);
}

#[test]
fn test_update_docs_roundtrip_matches_generation() {
    let dir = TempDir::new().unwrap();
    let (config, doc_options) = project(&dir);

    let parsed = parse(&["title!:string", "status:enum[draft,published]"]);
    create_module("post", &parsed, &config, &doc_options).unwrap();

    // wipe the docs and rebuild them from the generated sources alone
    std::fs::remove_dir_all(dir.path().join("postman")).unwrap();
    std::fs::remove_file(dir.path().join("swagger.json")).unwrap();

    update_existing_modules_documentation(&config.modules_dir, &doc_options, &[]).unwrap();

    let collection: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("postman/post.postman_collection.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(collection["info"]["name"], "Post API");
    let raw = collection["item"][0]["request"]["body"]["raw"].as_str().unwrap();
    assert!(raw.contains("{{title}}"));
    assert!(raw.contains("{{status}}"));

    let swagger: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("swagger.json")).unwrap())
            .unwrap();
    assert_eq!(
        swagger["components"]["schemas"]["Post"]["properties"]["status"]["enum"],
        serde_json::json!(["draft", "published"])
    );
}

#[test]
fn test_generation_is_deterministic() {
    let tokens = [
        "name!:string",
        "status:enum[active,inactive]",
        "items:array:object:sku:string:qty:number",
    ];

    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let (config_a, docs_a) = project(&dir_a);
    let (config_b, docs_b) = project(&dir_b);

    create_module("thing", &parse(&tokens), &config_a, &docs_a).unwrap();
    create_module("thing", &parse(&tokens), &config_b, &docs_b).unwrap();

    for kind in ["interface", "model", "controller", "service", "route", "validation", "constants"]
    {
        let file = format!("thing/thing.{}.ts", kind);
        let a = std::fs::read_to_string(config_a.modules_dir.join(&file)).unwrap();
        let b = std::fs::read_to_string(config_b.modules_dir.join(&file)).unwrap();
        assert_eq!(a, b, "nondeterministic output in {}", file);
    }
}

#[test]
fn test_missing_router_file_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let config = GeneratorConfig {
        modules_dir: dir.path().join("src/app/modules"),
        routes_file: dir.path().join("src/routes/index.ts"),
    };
    let doc_options = DocOptions {
        postman_dir: dir.path().join("postman"),
        swagger_file: dir.path().join("swagger.json"),
        update_postman: false,
        update_swagger: false,
        postman_env: None,
    };

    create_module("user", &parse(&["name:string"]), &config, &doc_options).unwrap();
    assert!(config.modules_dir.join("user/user.model.ts").exists());
    assert!(!Path::new(&config.routes_file).exists());
}
