//! Renders `<folder>.controller.ts`: catchAsync-wrapped handlers for the
//! five CRUD operations, exported as a controller object.

use crate::codegen::artifacts::has_file_field;
use crate::codegen::types::FieldDefinition;

pub fn render(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    file_upload: bool,
) -> String {
    let uploads = has_file_field(fields, file_upload);

    let body_extraction = if uploads {
        format!(
            "const {{ image, ...{folder}Data }} = req.body;\n    if (image?.length > 0) {{\n      {folder}Data.image = image[0];\n    }}",
            folder = folder_name
        )
    } else {
        format!("const {}Data = req.body;", folder_name)
    };

    format!(
        r#"import {{ Request, Response, NextFunction }} from 'express';
import {{ {name}Services }} from './{folder}.service';
import catchAsync from '../../../shared/catchAsync';
import sendResponse from '../../../shared/sendResponse';
import {{ StatusCodes }} from 'http-status-codes';

const create{name} = catchAsync(
  async (req: Request, res: Response, next: NextFunction) => {{
    {body_extraction}
    const result = await {name}Services.create{name}({folder}Data);
    sendResponse(res, {{
      statusCode: StatusCodes.CREATED,
      success: true,
      message: '{name} created successfully',
      data: result,
    }});
  }},
);

const update{name} = catchAsync(
  async (req: Request, res: Response, next: NextFunction) => {{
    const {{ id }} = req.params;
    {body_extraction}
    const result = await {name}Services.update{name}(id, {folder}Data);
    sendResponse(res, {{
      statusCode: StatusCodes.OK,
      success: true,
      message: '{name} updated successfully',
      data: result,
    }});
  }},
);

const delete{name} = catchAsync(
  async (req: Request, res: Response, next: NextFunction) => {{
    const {{ id }} = req.params;
    const result = await {name}Services.delete{name}(id);
    sendResponse(res, {{
      statusCode: StatusCodes.OK,
      success: true,
      message: '{name} deleted successfully',
      data: result,
    }});
  }},
);

const get{name} = catchAsync(
  async (req: Request, res: Response, next: NextFunction) => {{
    const {{ id }} = req.params;
    const result = await {name}Services.get{name}(id);
    sendResponse(res, {{
      statusCode: StatusCodes.OK,
      success: true,
      message: '{name} retrieved successfully',
      data: result,
    }});
  }},
);

const getAll{name}s = catchAsync(
  async (req: Request, res: Response, next: NextFunction) => {{
    const result = await {name}Services.getAll{name}s();
    sendResponse(res, {{
      statusCode: StatusCodes.OK,
      success: true,
      message: '{name}s retrieved successfully',
      data: result,
    }});
  }},
);

export const {name}Controller = {{
  create{name},
  update{name},
  delete{name},
  get{name},
  getAll{name}s,
}};
"#,
        name = pascal_name,
        folder = folder_name,
        body_extraction = body_extraction,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::types::TypeTag;

    #[test]
    fn test_exports_five_handlers() {
        let out = render("User", "user", &[], false);
        for handler in [
            "createUser",
            "updateUser",
            "deleteUser",
            "getUser",
            "getAllUsers",
        ] {
            assert!(out.contains(&format!("const {} = catchAsync(", handler)));
        }
        assert!(out.contains("export const UserController = {"));
    }

    #[test]
    fn test_plain_body_extraction() {
        let out = render("User", "user", &[], false);
        assert!(out.contains("const userData = req.body;"));
        assert!(!out.contains("image"));
    }

    #[test]
    fn test_upload_body_extraction() {
        let fields = vec![FieldDefinition::new("image", TypeTag::String)];
        let out = render("Post", "post", &fields, false);
        assert!(out.contains("const { image, ...postData } = req.body;"));
        assert!(out.contains("postData.image = image[0];"));
    }
}
