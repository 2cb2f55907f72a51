//! Semester listing pipeline.
//!
//! Each step is a plain function over sequences:
//! filter -> join -> project -> sort -> slice, followed by main-teacher
//! resolution for the returned page only.

use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::person::Person;
use crate::model::teacher::TeacherRegistration;
use crate::service::dto::CourseInstanceView;
use std::collections::HashMap;

/// Keeps instances taught in `semester`.
pub fn filter_by_semester<'a>(
    instances: &'a [CourseInstance],
    semester: &str,
) -> Vec<&'a CourseInstance> {
    instances
        .iter()
        .filter(|instance| instance.semester_id == semester)
        .collect()
}

/// Inner-joins instances with their template by course code.
///
/// Instances whose template is missing are dropped.
pub fn join_templates<'a>(
    instances: Vec<&'a CourseInstance>,
    templates: &'a [CourseTemplate],
) -> Vec<(&'a CourseInstance, &'a CourseTemplate)> {
    let by_code: HashMap<&str, &CourseTemplate> = templates
        .iter()
        .map(|template| (template.course_id.as_str(), template))
        .collect();

    instances
        .into_iter()
        .filter_map(|instance| {
            by_code
                .get(instance.course_id.as_str())
                .map(|template| (instance, *template))
        })
        .collect()
}

/// Projects joined rows into views with an empty main teacher.
///
/// `language == default_language` selects the default-locale name; anything
/// else selects the English name.
pub fn project(
    rows: Vec<(&CourseInstance, &CourseTemplate)>,
    language: &str,
    default_language: &str,
) -> Vec<CourseInstanceView> {
    let use_default_name = language == default_language;
    rows.into_iter()
        .map(|(instance, template)| CourseInstanceView {
            name: if use_default_name {
                template.name.clone()
            } else {
                template.name_en.clone()
            },
            template_id: template.course_id.clone(),
            course_instance_id: instance.id,
            main_teacher: String::new(),
        })
        .collect()
}

/// Sorts views ascending by course instance id.
pub fn sort_by_instance_id(mut views: Vec<CourseInstanceView>) -> Vec<CourseInstanceView> {
    views.sort_by_key(|view| view.course_instance_id);
    views
}

/// Returns elements `[(page - 1) * page_size, page * page_size)`.
///
/// Page `0` is treated like page `1`. Pages past the end are empty.
pub fn slice_page<T>(items: Vec<T>, page: u32, page_size: u32) -> Vec<T> {
    let page_size = page_size as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}

/// Fills `main_teacher` for each view from its main-teacher registration.
///
/// Views without a main-teacher registration, or whose registered SSN has no
/// person, keep the empty string.
pub fn resolve_main_teachers(
    views: &mut [CourseInstanceView],
    registrations: &[TeacherRegistration],
    persons: &[Person],
) {
    let names_by_ssn: HashMap<&str, &str> = persons
        .iter()
        .map(|person| (person.ssn.as_str(), person.name.as_str()))
        .collect();

    for view in views {
        let main_teacher = registrations.iter().find(|registration| {
            registration.course_instance_id == view.course_instance_id
                && registration.is_main_teacher()
        });

        if let Some(name) = main_teacher
            .and_then(|registration| names_by_ssn.get(registration.ssn.as_str()))
        {
            view.main_teacher = (*name).to_string();
        }
    }
}
