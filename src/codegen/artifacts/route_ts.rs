//! Renders `<folder>.route.ts`: the Express router wiring with auth,
//! request validation, and optional file-processing middleware.
//!
//! Handler and validation names match what the controller and validation
//! renderers actually export.

use crate::codegen::artifacts::has_file_field;
use crate::codegen::types::FieldDefinition;

pub fn render(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    file_upload: bool,
) -> String {
    let uploads = has_file_field(fields, file_upload);

    let upload_import = if uploads {
        "import { fileAndBodyProcessorUsingDiskStorage } from '../../middleware/processReqBody';\n"
    } else {
        ""
    };
    let upload_middleware = if uploads {
        "  fileAndBodyProcessorUsingDiskStorage(),\n"
    } else {
        ""
    };

    format!(
        r#"import express from 'express';
import {{ {name}Controller }} from './{folder}.controller';
import {{ {name}Validations }} from './{folder}.validation';
import validateRequest from '../../middleware/validateRequest';
import auth from '../../middleware/auth';
import {{ USER_ROLES }} from '../../../enum/user';
{upload_import}
const router = express.Router();

router.get(
  '/',
  auth(
    USER_ROLES.SUPER_ADMIN,
    USER_ROLES.ADMIN
  ),
  validateRequest({name}Validations.getAll),
  {name}Controller.getAll{name}s
);

router.get(
  '/:id',
  auth(
    USER_ROLES.SUPER_ADMIN,
    USER_ROLES.ADMIN
  ),
  validateRequest({name}Validations.getById),
  {name}Controller.get{name}
);

router.post(
  '/',
  auth(
    USER_ROLES.SUPER_ADMIN,
    USER_ROLES.ADMIN
  ),
{upload_middleware}  validateRequest({name}Validations.create),
  {name}Controller.create{name}
);

router.patch(
  '/:id',
  auth(
    USER_ROLES.SUPER_ADMIN,
    USER_ROLES.ADMIN
  ),
{upload_middleware}  validateRequest({name}Validations.update),
  {name}Controller.update{name}
);

router.delete(
  '/:id',
  auth(
    USER_ROLES.SUPER_ADMIN,
    USER_ROLES.ADMIN
  ),
  validateRequest({name}Validations.delete),
  {name}Controller.delete{name}
);

export const {name}Routes = router;
"#,
        name = pascal_name,
        folder = folder_name,
        upload_import = upload_import,
        upload_middleware = upload_middleware,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::types::TypeTag;

    #[test]
    fn test_routes_reference_exported_names() {
        let out = render("User", "user", &[], false);
        // every referenced symbol is one the controller/validation files export
        assert!(out.contains("validateRequest(UserValidations.create)"));
        assert!(out.contains("validateRequest(UserValidations.update)"));
        assert!(out.contains("UserController.getUser"));
        assert!(out.contains("UserController.getAllUsers"));
        assert!(out.contains("export const UserRoutes = router;"));
    }

    #[test]
    fn test_upload_middleware_only_on_write_routes() {
        let fields = vec![FieldDefinition::new("image", TypeTag::String)];
        let out = render("Post", "post", &fields, false);
        assert_eq!(out.matches("fileAndBodyProcessorUsingDiskStorage(),").count(), 2);
        assert!(out.contains("import { fileAndBodyProcessorUsingDiskStorage }"));

        let plain = render("User", "user", &[], false);
        assert!(!plain.contains("fileAndBodyProcessorUsingDiskStorage"));
    }
}
