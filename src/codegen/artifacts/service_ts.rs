//! Renders `<folder>.service.ts`: the data-access layer over the Mongoose
//! model, with not-found and failure errors raised as ApiError.

use crate::codegen::artifacts::has_file_field;
use crate::codegen::types::FieldDefinition;

pub fn render(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    file_upload: bool,
) -> String {
    let uploads = has_file_field(fields, file_upload);

    let upload_imports = if uploads {
        "import { removeUploadedFiles } from '../../../helpers/fileHelper';\n"
    } else {
        ""
    };
    let create_cleanup = if uploads {
        "    removeUploadedFiles(payload.image);\n"
    } else {
        ""
    };

    format!(
        r#"import {{ StatusCodes }} from 'http-status-codes';
import ApiError from '../../../errors/ApiError';
import {{ I{name} }} from './{folder}.interface';
import {{ {name} }} from './{folder}.model';
import {{ Types }} from 'mongoose';
{upload_imports}
const create{name} = async (payload: I{name}): Promise<I{name}> => {{
  const result = await {name}.create(payload);
  if (!result) {{
{create_cleanup}    throw new ApiError(StatusCodes.BAD_REQUEST, 'Failed to create {folder}');
  }}

  return result;
}};

const update{name} = async (
  id: string,
  payload: Partial<I{name}>,
): Promise<I{name} | null> => {{
  const isExist = await {name}.findById(new Types.ObjectId(id));
  if (!isExist) throw new ApiError(StatusCodes.NOT_FOUND, '{name} not found');
  const result = await {name}.findOneAndUpdate({{ _id: id }}, payload, {{
    new: true,
  }});
  return result;
}};

const delete{name} = async (id: string): Promise<I{name} | null> => {{
  const result = await {name}.findByIdAndDelete(new Types.ObjectId(id));
  if (!result)
    throw new ApiError(StatusCodes.BAD_REQUEST, 'Failed to delete {folder}.');
  return result;
}};

const get{name} = async (id: string): Promise<I{name} | null> => {{
  const result = await {name}.findById(new Types.ObjectId(id));
  if (!result)
    throw new ApiError(StatusCodes.NOT_FOUND, 'Requested {folder} not found.');
  return result;
}};

const getAll{name}s = async (): Promise<I{name}[]> => {{
  const result = await {name}.find();

  return result;
}};

export const {name}Services = {{
  create{name},
  update{name},
  delete{name},
  get{name},
  getAll{name}s,
}};
"#,
        name = pascal_name,
        folder = folder_name,
        upload_imports = upload_imports,
        create_cleanup = create_cleanup,
    )
}
