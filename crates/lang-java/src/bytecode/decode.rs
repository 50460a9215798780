use hierscope_api::{ClassName, ReadResult, ReaderError, TypeHierarchyElement};
use ristretto_classfile::{ClassFile, ConstantPool};
use std::io::Cursor;

/// Extract the hierarchy facts of a compiled class.
///
/// Only the constant pool, `this_class`, `super_class` and the interface
/// table are consulted. `expected` is the name the bytes were looked up
/// under; a class file declaring a different name is rejected.
pub fn decode_class(bytes: Vec<u8>, expected: &ClassName) -> ReadResult<TypeHierarchyElement> {
    let class_file = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| ReaderError::decode(expected.as_str(), format!("{e:?}")))?;
    let pool = &class_file.constant_pool;

    let name = class_name_at(pool, class_file.this_class, expected)?;
    if name != *expected {
        return Err(ReaderError::decode(
            expected.as_str(),
            format!("class file declares {}", name),
        ));
    }

    // Index 0 marks the root of the hierarchy
    let superclass = match class_file.super_class {
        0 => None,
        index => Some(class_name_at(pool, index, expected)?),
    };

    let interfaces = class_file
        .interfaces
        .iter()
        .map(|&index| class_name_at(pool, index, expected))
        .collect::<ReadResult<Vec<_>>>()?;

    Ok(TypeHierarchyElement::new(name, superclass, interfaces))
}

fn class_name_at(pool: &ConstantPool, index: u16, class: &ClassName) -> ReadResult<ClassName> {
    pool.try_get_class(index)
        .map(ClassName::new)
        .map_err(|e| ReaderError::decode(class.as_str(), format!("constant {index}: {e:?}")))
}
