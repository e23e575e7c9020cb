use access_core::err::{Context, Result};
use jni::{
    objects::{JObject, JString},
    JNIEnv,
};

/// Reads a java.lang.String into a rust string, None if the reference is null
pub fn java_string(env: &mut JNIEnv, obj: JObject) -> Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }

    let obj = JString::from(obj);
    let java_str = env
        .get_string(&obj)
        .context("Failed to read java string")?;

    // java strings are encoded as "modified utf8"
    let string = cesu8::from_java_cesu8(java_str.to_bytes())
        .context("Failed to convert java string during utf8 parsing")?
        .to_string();

    Ok(Some(string))
}
