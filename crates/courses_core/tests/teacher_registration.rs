use courses_core::db::open_db_in_memory;
use courses_core::{
    AddTeacherRequest, CourseInstance, CourseService, CourseTemplate, InMemoryUnitOfWork, Person,
    RepoError, ServiceError, SqliteUnitOfWork, TeacherRegistration, TeacherType, UnitOfWork,
    ValidationCode,
};

const SSN_DABS: &str = "1203735289";
const SSN_GUNNA: &str = "1234567890";
const INVALID_SSN: &str = "9876543210";

const NAME_DABS: &str = "Daníel B. Sigurgeirsson";
const NAME_GUNNA: &str = "Guðrún Guðmundsdóttir";

const COURSEID_VEFT_20153: i64 = 1337;
const COURSEID_VEFT_20163: i64 = 1338;
const INVALID_COURSEID: i64 = 9999;

fn persons() -> Vec<Person> {
    vec![
        Person::new(1, NAME_DABS, SSN_DABS, "dabs@ru.is"),
        Person::new(2, NAME_GUNNA, SSN_GUNNA, "gunna@ru.is"),
    ]
}

fn templates() -> Vec<CourseTemplate> {
    vec![CourseTemplate::new("T-514-VEFT", "Vefþjónustur", "Web Services")
        .with_description("Í þessum áfanga verður fjallað um vefþj...")]
}

fn instances() -> Vec<CourseInstance> {
    vec![
        CourseInstance::new(COURSEID_VEFT_20153, "T-514-VEFT", "20153"),
        CourseInstance::new(COURSEID_VEFT_20163, "T-514-VEFT", "20163"),
    ]
}

fn registrations() -> Vec<TeacherRegistration> {
    vec![TeacherRegistration::with_id(
        101,
        COURSEID_VEFT_20153,
        SSN_DABS,
        TeacherType::MainTeacher,
    )]
}

fn setup() -> CourseService<InMemoryUnitOfWork> {
    let uow = InMemoryUnitOfWork::new()
        .with_persons(persons())
        .with_course_templates(templates())
        .with_course_instances(instances())
        .with_teacher_registrations(registrations());
    CourseService::with_defaults(uow)
}

fn stored_registrations(
    service: &CourseService<InMemoryUnitOfWork>,
) -> Vec<TeacherRegistration> {
    service
        .unit_of_work()
        .repository::<TeacherRegistration>()
        .all()
        .unwrap()
}

fn assert_validation(err: ServiceError, expected: ValidationCode) {
    assert_eq!(err.validation_code(), Some(expected), "got {err:?}");
    assert_eq!(err.to_string(), expected.as_str());
}

#[test]
fn add_teacher_with_valid_teacher_and_course() {
    let mut service = setup();
    let prev_count = stored_registrations(&service).len();

    let summary = service
        .add_teacher_to_course(
            COURSEID_VEFT_20163,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::MainTeacher),
        )
        .unwrap();

    assert_eq!(summary.ssn, SSN_GUNNA);
    assert_eq!(summary.name, NAME_GUNNA);

    let stored = stored_registrations(&service);
    assert_eq!(stored.len(), prev_count + 1);
    let new_entity = stored
        .iter()
        .find(|registration| registration.course_instance_id == COURSEID_VEFT_20163)
        .unwrap();
    assert_eq!(new_entity.ssn, SSN_GUNNA);
    assert_eq!(new_entity.role, TeacherType::MainTeacher);
    assert_eq!(new_entity.id, Some(102));

    assert!(service.unit_of_work().save_count() > 0);
}

#[test]
fn add_teacher_invalid_course() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            INVALID_COURSEID,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::AssistantTeacher),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::ObjectNotFound));
    assert_eq!(err.validation_code(), None);
    assert_eq!(service.unit_of_work().save_count(), 0);
}

#[test]
fn add_teacher_invalid_teacher() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20153,
            &AddTeacherRequest::new(INVALID_SSN, TeacherType::MainTeacher),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::ObjectNotFound));
}

#[test]
fn unknown_course_is_reported_before_unknown_person() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            INVALID_COURSEID,
            &AddTeacherRequest::new(INVALID_SSN, TeacherType::MainTeacher),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::ObjectNotFound));
}

#[test]
fn add_teacher_already_with_main_teacher() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20153,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::MainTeacher),
        )
        .unwrap_err();

    assert_validation(err, ValidationCode::CourseAlreadyHasMainTeacher);
    assert_eq!(stored_registrations(&service).len(), 1);
}

#[test]
fn add_teacher_person_already_registered_as_teacher_in_course() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20153,
            &AddTeacherRequest::new(SSN_DABS, TeacherType::AssistantTeacher),
        )
        .unwrap_err();

    assert_validation(err, ValidationCode::PersonAlreadyRegisteredTeacherInCourse);
}

#[test]
fn main_teacher_check_wins_over_duplicate_person_check() {
    let mut service = setup();

    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20153,
            &AddTeacherRequest::new(SSN_DABS, TeacherType::MainTeacher),
        )
        .unwrap_err();

    assert_validation(err, ValidationCode::CourseAlreadyHasMainTeacher);
}

#[test]
fn registering_same_person_twice_fails_second_time() {
    let mut service = setup();
    let request = AddTeacherRequest::new(SSN_GUNNA, TeacherType::AssistantTeacher);

    service
        .add_teacher_to_course(COURSEID_VEFT_20153, &request)
        .unwrap();
    let err = service
        .add_teacher_to_course(COURSEID_VEFT_20153, &request)
        .unwrap_err();

    assert_validation(err, ValidationCode::PersonAlreadyRegisteredTeacherInCourse);
    assert_eq!(service.unit_of_work().save_count(), 1);
}

#[test]
fn assistant_can_be_added_to_course_with_main_teacher() {
    let mut service = setup();

    let summary = service
        .add_teacher_to_course(
            COURSEID_VEFT_20153,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::AssistantTeacher),
        )
        .unwrap();

    assert_eq!(summary.name, NAME_GUNNA);
    let stored = stored_registrations(&service);
    let mains = stored
        .iter()
        .filter(|registration| {
            registration.course_instance_id == COURSEID_VEFT_20153
                && registration.is_main_teacher()
        })
        .count();
    assert_eq!(mains, 1);
}

#[test]
fn at_most_one_main_teacher_after_any_sequence() {
    let mut service = setup();
    let attempts = [
        (COURSEID_VEFT_20163, SSN_GUNNA, TeacherType::AssistantTeacher, None),
        (COURSEID_VEFT_20163, SSN_DABS, TeacherType::MainTeacher, None),
        (
            COURSEID_VEFT_20163,
            SSN_GUNNA,
            TeacherType::MainTeacher,
            Some(ValidationCode::CourseAlreadyHasMainTeacher),
        ),
        (
            COURSEID_VEFT_20153,
            SSN_GUNNA,
            TeacherType::MainTeacher,
            Some(ValidationCode::CourseAlreadyHasMainTeacher),
        ),
        (COURSEID_VEFT_20153, SSN_GUNNA, TeacherType::AssistantTeacher, None),
    ];

    for (course_instance_id, ssn, role, expected) in attempts {
        let request = AddTeacherRequest::new(ssn, role);
        let result = service.add_teacher_to_course(course_instance_id, &request);
        match expected {
            None => assert_eq!(result.unwrap().ssn, ssn),
            Some(code) => assert_validation(result.unwrap_err(), code),
        }
    }

    let stored = stored_registrations(&service);
    for course_instance_id in [COURSEID_VEFT_20153, COURSEID_VEFT_20163] {
        let mains = stored
            .iter()
            .filter(|registration| {
                registration.course_instance_id == course_instance_id
                    && registration.is_main_teacher()
            })
            .count();
        assert_eq!(mains, 1, "course instance {course_instance_id}");
    }
    assert_eq!(stored.len(), 4);
}

#[test]
fn unit_of_work_is_returned_with_committed_registration() {
    let mut service = setup();
    service
        .add_teacher_to_course(
            COURSEID_VEFT_20163,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::AssistantTeacher),
        )
        .unwrap();

    let uow = service.into_unit_of_work();
    assert_eq!(uow.save_count(), 1);
    assert_eq!(uow.staged_count(), 0);
    assert_eq!(
        uow.repository::<TeacherRegistration>().all().unwrap().len(),
        2
    );
}

#[test]
fn sqlite_backend_commits_registration() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut uow = SqliteUnitOfWork::try_new(&mut conn).unwrap();
        for person in persons() {
            uow.repository_mut::<Person>().add(person).unwrap();
        }
        for template in templates() {
            uow.repository_mut::<CourseTemplate>().add(template).unwrap();
        }
        for instance in instances() {
            uow.repository_mut::<CourseInstance>().add(instance).unwrap();
        }
        for registration in registrations() {
            uow.repository_mut::<TeacherRegistration>()
                .add(registration)
                .unwrap();
        }
        uow.save().unwrap();
    }

    let uow = SqliteUnitOfWork::try_new(&mut conn).unwrap();
    let mut service = CourseService::with_defaults(uow);
    let summary = service
        .add_teacher_to_course(
            COURSEID_VEFT_20163,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::MainTeacher),
        )
        .unwrap();
    assert_eq!(summary.name, NAME_GUNNA);

    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20163,
            &AddTeacherRequest::new(SSN_DABS, TeacherType::MainTeacher),
        )
        .unwrap_err();
    assert_validation(err, ValidationCode::CourseAlreadyHasMainTeacher);

    let stored = service
        .unit_of_work()
        .repository::<TeacherRegistration>()
        .all()
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|registration| registration.id.is_some()));
}

#[test]
fn store_constraint_failure_propagates_as_store_error() {
    let mut conn = open_db_in_memory().unwrap();
    let mut uow = SqliteUnitOfWork::try_new(&mut conn).unwrap();
    for person in persons() {
        uow.repository_mut::<Person>().add(person).unwrap();
    }
    for template in templates() {
        uow.repository_mut::<CourseTemplate>().add(template).unwrap();
    }
    for instance in instances() {
        uow.repository_mut::<CourseInstance>().add(instance).unwrap();
    }
    uow.save().unwrap();

    // Staged rows are invisible to the registration checks, so this main
    // teacher and the service's own land in one commit and collide.
    uow.repository_mut::<TeacherRegistration>()
        .add(TeacherRegistration::new(
            COURSEID_VEFT_20163,
            SSN_DABS,
            TeacherType::MainTeacher,
        ))
        .unwrap();

    let mut service = CourseService::with_defaults(uow);
    let err = service
        .add_teacher_to_course(
            COURSEID_VEFT_20163,
            &AddTeacherRequest::new(SSN_GUNNA, TeacherType::MainTeacher),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::Store(RepoError::Db(_))));
    let stored = service
        .unit_of_work()
        .repository::<TeacherRegistration>()
        .all()
        .unwrap();
    assert!(stored.is_empty());
}
